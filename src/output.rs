use std::borrow::Cow;

use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Panel, Style};
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::types::DetailedPullRequest;

/// Table border/colour theme, selected by `print.style` or `--style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    Bold,
    ColoredBright,
    ColoredDark,
    Double,
    Light,
    Rounded,
    #[default]
    Default,
}

impl TableStyle {
    pub const NAMES: [&'static str; 7] = [
        "bold",
        "colored_bright",
        "colored_dark",
        "double",
        "light",
        "rounded",
        "default",
    ];

    /// Unrecognized names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bold" => TableStyle::Bold,
            "colored_bright" => TableStyle::ColoredBright,
            "colored_dark" => TableStyle::ColoredDark,
            "double" => TableStyle::Double,
            "light" => TableStyle::Light,
            "rounded" => TableStyle::Rounded,
            _ => TableStyle::Default,
        }
    }

    fn is_colored(self) -> bool {
        matches!(self, TableStyle::ColoredBright | TableStyle::ColoredDark)
    }
}

pub struct RenderOptions<'a> {
    pub style: TableStyle,
    pub title: Option<&'a str>,
    pub json: bool,
}

#[derive(Tabled)]
struct PullRequestRow {
    #[tabled(rename = "PR Number")]
    number: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "PR Link")]
    url: String,
    #[tabled(rename = "Status")]
    state: String,
    #[tabled(rename = "PR Condition")]
    condition: String,
    #[tabled(rename = "Mergeable")]
    mergeable: bool,
    #[tabled(rename = "CI/CD Status")]
    ci_cd_status: String,
}

impl PullRequestRow {
    fn new(pr: &DetailedPullRequest, style: TableStyle) -> Self {
        let ci_cd_status = if style.is_colored() {
            ci_status_colored(&pr.ci_cd_status)
        } else {
            pr.ci_cd_status.clone()
        };

        Self {
            number: pr.number,
            title: pr.title.clone(),
            url: pr.url.clone(),
            state: pr.state.clone(),
            condition: pr.condition.to_string(),
            mergeable: pr.mergeable,
            ci_cd_status,
        }
    }
}

/// Print the report as a table, or as JSON with `--json`.
pub fn print_report(
    pull_requests: &[DetailedPullRequest],
    options: &RenderOptions<'_>,
) -> Result<()> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(pull_requests)?);
    } else {
        println!("{}", render_table(pull_requests, options.style, options.title));
    }
    Ok(())
}

/// Render rows in insertion order followed by a `Total` footer.
pub fn render_table(
    pull_requests: &[DetailedPullRequest],
    style: TableStyle,
    title: Option<&str>,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(PullRequestRow::headers().into_iter().map(Cow::into_owned));
    for pr in pull_requests {
        let row = PullRequestRow::new(pr, style);
        builder.push_record(row.fields().into_iter().map(Cow::into_owned));
    }
    builder.push_record(footer(pull_requests.len()));

    let mut table = builder.build();
    let header_row = match title {
        Some(title) => {
            table.with(Panel::header(title));
            1
        }
        None => 0,
    };
    apply_style(&mut table, style, header_row);

    table.to_string()
}

fn footer(total: usize) -> Vec<String> {
    let mut row = vec![String::new(); PullRequestRow::LENGTH];
    row[0] = "Total".to_string();
    row[1] = total.to_string();
    row
}

fn apply_style(table: &mut Table, style: TableStyle, header_row: usize) {
    match style {
        TableStyle::Default => {
            table.with(Style::ascii());
        }
        TableStyle::Light => {
            table.with(Style::modern());
        }
        TableStyle::Rounded => {
            table.with(Style::rounded());
        }
        TableStyle::Double => {
            table.with(Style::extended());
        }
        TableStyle::Bold => {
            table.with(
                Style::modern()
                    .top('━')
                    .bottom('━')
                    .left('┃')
                    .right('┃')
                    .horizontal('━')
                    .vertical('┃')
                    .corner_top_left('┏')
                    .corner_top_right('┓')
                    .corner_bottom_left('┗')
                    .corner_bottom_right('┛')
                    .intersection_top('┳')
                    .intersection_bottom('┻')
                    .intersection_left('┣')
                    .intersection_right('┫')
                    .intersection('╋'),
            );
        }
        TableStyle::ColoredBright => {
            table.with(Style::modern());
            table.modify(Rows::one(header_row), Color::BG_BRIGHT_CYAN | Color::FG_BLACK);
            table.modify(Rows::last(), Color::BG_CYAN | Color::FG_BLACK);
        }
        TableStyle::ColoredDark => {
            table.with(Style::modern());
            table.modify(Rows::one(header_row), Color::BG_BLUE | Color::FG_BRIGHT_WHITE);
            table.modify(Rows::last(), Color::BG_BLACK | Color::FG_BRIGHT_WHITE);
        }
    }
}

/// Colour a combined status state for terminal output.
pub fn ci_status_colored(status: &str) -> String {
    match status {
        "success" => status.green().to_string(),
        "pending" => status.yellow().to_string(),
        "failure" | "error" => status.red().bold().to_string(),
        _ => status.bright_black().to_string(),
    }
}
