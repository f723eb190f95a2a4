use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::credentials::DEFAULT_TOKEN_ENV_VAR;
use crate::error::Result;
use crate::request::{RequestDescriptor, StateFilter, ALL};

#[derive(Parser)]
#[command(name = "gh-digest")]
#[command(
    about = "A daily digest of your GitHub work",
    long_about = "A daily digest of your GitHub work: open pull requests you authored, are assigned to, or were asked to review, with their CI/CD status",
    version
)]
#[command(after_help = "EXAMPLES:
    gh-digest                          Open pull requests across your repositories
    gh-digest -r my-repo -s all        Every pull request of one repository
    gh-digest --with-orgs              Include every organization you belong to
    gh-digest --with-orgs -o acme      Include one organization
    gh-digest --json                   Emit the report as JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// The name of the environment variable holding the GitHub token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV_VAR)]
    pub env_var: String,

    /// The repository to fetch pull requests from [all|<repo_name>]
    #[arg(long, short, default_value = ALL)]
    pub repo: String,

    /// The state of the pull requests to fetch [open|closed|all]
    #[arg(long, short, default_value = "open")]
    pub status: StateFilter,

    /// Fetch pull requests from organizations you are part of
    #[arg(long, short)]
    pub with_orgs: bool,

    /// The organization to fetch pull requests from [all|<org_name>]
    #[arg(long, short)]
    pub org: Option<String>,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Table style, overriding print.style from the config
    #[arg(long)]
    pub style: Option<String>,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,

    /// Suppress informational logs
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn descriptor(&self) -> Result<RequestDescriptor> {
        RequestDescriptor::from_args(
            &self.repo,
            self.status,
            self.with_orgs,
            self.org.as_deref(),
            &self.env_var,
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file interactively
    #[command(after_help = "EXAMPLES:
    gh-digest init
    gh-digest init --config ./digest.toml")]
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    gh-digest completions bash > ~/.bash_completion.d/gh-digest
    gh-digest completions zsh > ~/.zfunc/_gh-digest")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
