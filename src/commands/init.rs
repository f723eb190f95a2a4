use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{DigestError, Result};
use crate::output::TableStyle;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &mut out,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;
        if !answer.eq_ignore_ascii_case("y") {
            writeln!(out, "Aborted.")?;
            return Ok(());
        }
    }

    writeln!(out, "gh-digest Configuration")?;
    writeln!(out, "=======================\n")?;

    let title = prompt(&mut input, &mut out, "Table title [optional]: ")?;
    let style = prompt(
        &mut input,
        &mut out,
        &format!("Table style ({}) [default]: ", TableStyle::NAMES.join(", ")),
    )?;
    let rate_type = prompt(
        &mut input,
        &mut out,
        "Rate limit guard type (percentage, fixed) [percentage]: ",
    )?;
    let rate_limit = prompt(&mut input, &mut out, "Rate limit guard value [10]: ")?;

    let contents = render_config(&title, &style, &rate_type, &rate_limit);

    // Validate before writing so a bad answer never lands on disk.
    Config::parse(&contents, &config_path)?;
    write_config(&config_path, &contents)?;

    writeln!(out, "\nConfig saved to {}", config_path.display())?;
    Ok(())
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn render_config(title: &str, style: &str, rate_type: &str, rate_limit: &str) -> String {
    let or_default = |value: &str, default: &str| {
        if value.is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };

    let mut contents = String::new();
    if !title.is_empty() {
        contents.push_str(&format!("title = {}\n\n", toml_string(title)));
    }
    contents.push_str(&format!(
        "[print]\nstyle = {}\n\n",
        toml_string(&or_default(style, "default"))
    ));
    contents.push_str(&format!(
        "[rate]\ntype = {}\nlimit = {}\n",
        toml_string(&or_default(rate_type, "percentage")),
        or_default(rate_limit, "10")
    ));
    contents
}

fn toml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DigestError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, contents).map_err(|e| DigestError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
