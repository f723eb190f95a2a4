mod cli;
mod client;
mod commands;
mod config;
mod credentials;
mod error;
mod logging;
mod output;
mod pipeline;
mod request;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use logging::Verbosity;
use output::{RenderOptions, TableStyle};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gh-digest", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Init) => commands::init::run(cli.config.as_deref()),
        None => {
            // Flag validation happens before the config file or network are touched.
            let descriptor = cli.descriptor()?;
            let config = Config::load(cli.config.as_deref())?;

            let render = RenderOptions {
                style: cli
                    .style
                    .as_deref()
                    .map(TableStyle::from_name)
                    .unwrap_or(config.style),
                title: config.title.as_deref(),
                json: cli.json,
            };

            commands::digest::run(&config, &descriptor, &render).await
        }
    }
}
