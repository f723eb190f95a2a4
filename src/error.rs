use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GitHub API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("unsupported rate type: {0}, allowed rate types are: percentage, fixed")]
    InvalidRateType(String),

    #[error("rate limit percentage must be between 0 and 100, got {0}")]
    InvalidRatePercentage(u64),

    #[error("unsupported status: {0}, allowed statuses are: open, closed, all")]
    InvalidStatus(String),

    #[error("you can't use the --org flag without --with-orgs")]
    OrgWithoutWithOrgs,

    #[error("{0} environment variable not set or wrong flag used")]
    TokenNotSet(String),

    #[error(
        "You have {remaining} requests remaining out of {limit} (threshold {threshold}), stopping execution"
    )]
    QuotaExceeded {
        remaining: u64,
        limit: u64,
        threshold: u64,
    },

    #[error("repository {owner}/{name} not found")]
    RepositoryNotFound { owner: String, name: String },

    #[error("organization {0} not found")]
    OrganizationNotFound(String),

    #[error("errors occurred while fetching pull requests: {}", failures.join("; "))]
    RepositoryFetch { failures: Vec<String> },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;
