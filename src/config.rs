use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::client::DEFAULT_API_BASE;
use crate::error::{DigestError, Result};
use crate::output::TableStyle;

const DEFAULT_RATE_PERCENTAGE: u64 = 10;

/// Pre-flight quota cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateConfig {
    /// Abort when fewer than `n`% of the limit remains.
    Percentage(u64),
    /// Abort when fewer than `n` requests remain.
    Fixed(u64),
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig::Percentage(DEFAULT_RATE_PERCENTAGE)
    }
}

impl RateConfig {
    pub fn threshold(self, limit: u64) -> u64 {
        match self {
            RateConfig::Percentage(value) => value.saturating_mul(limit) / 100,
            RateConfig::Fixed(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub title: Option<String>,
    pub style: TableStyle,
    pub rate: RateConfig,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: None,
            style: TableStyle::default(),
            rate: RateConfig::default(),
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Deserialize, Default)]
struct RawConfig {
    title: Option<String>,
    #[serde(default)]
    print: RawPrint,
    #[serde(default)]
    rate: RawRate,
    #[serde(default)]
    api: RawApi,
}

#[derive(Deserialize, Default)]
struct RawPrint {
    style: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawRate {
    #[serde(rename = "type")]
    kind: Option<String>,
    limit: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RawApi {
    base_url: Option<String>,
}

impl Config {
    /// Load the config from an explicit path, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    return Ok(Config::default());
                }
                path
            }
        };

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| DigestError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents, &config_path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents).map_err(|e| DigestError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let rate = match raw.rate.kind.as_deref() {
            None | Some("percentage") => {
                let value = raw.rate.limit.unwrap_or(DEFAULT_RATE_PERCENTAGE);
                if value > 100 {
                    return Err(DigestError::InvalidRatePercentage(value));
                }
                RateConfig::Percentage(value)
            }
            Some("fixed") => RateConfig::Fixed(raw.rate.limit.unwrap_or_default()),
            Some(other) => return Err(DigestError::InvalidRateType(other.to_string())),
        };

        Ok(Self {
            title: raw.title.filter(|t| !t.trim().is_empty()),
            style: raw
                .print
                .style
                .as_deref()
                .map(TableStyle::from_name)
                .unwrap_or_default(),
            rate,
            api_base_url: raw
                .api
                .base_url
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "gh-digest")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DigestError::NoConfigDir)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(contents: &str) -> Result<Config> {
        Config::parse(contents, Path::new("config.toml"))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rate, RateConfig::Percentage(10));
        assert_eq!(config.style, TableStyle::Default);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
title = "Daily digest"

[print]
style = "rounded"

[rate]
type = "fixed"
limit = 250

[api]
base_url = "https://ghe.example.com/api/v3"
"#,
        )
        .unwrap();

        assert_eq!(config.title.as_deref(), Some("Daily digest"));
        assert_eq!(config.style, TableStyle::Rounded);
        assert_eq!(config.rate, RateConfig::Fixed(250));
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        let config = parse("[print]\nstyle = \"sparkly\"\n").unwrap();
        assert_eq!(config.style, TableStyle::Default);
    }

    #[test]
    fn test_invalid_rate_type_is_rejected() {
        let err = parse("[rate]\ntype = \"burst\"\nlimit = 5\n").unwrap_err();
        assert!(matches!(err, DigestError::InvalidRateType(ref t) if t == "burst"));
    }

    #[test]
    fn test_percentage_above_hundred_is_rejected() {
        let err = parse("[rate]\ntype = \"percentage\"\nlimit = 150\n").unwrap_err();
        assert!(matches!(err, DigestError::InvalidRatePercentage(150)));
    }

    #[test]
    fn test_negative_limit_is_parse_error() {
        let err = parse("[rate]\ntype = \"fixed\"\nlimit = -1\n").unwrap_err();
        assert!(matches!(err, DigestError::ConfigParse { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse("title = ").unwrap_err();
        assert!(matches!(err, DigestError::ConfigParse { .. }));
    }

    #[test]
    fn test_threshold_math() {
        assert_eq!(RateConfig::Percentage(10).threshold(5000), 500);
        assert_eq!(RateConfig::Percentage(10).threshold(60), 6);
        assert_eq!(RateConfig::Percentage(10).threshold(15), 1);
        assert_eq!(RateConfig::Percentage(0).threshold(5000), 0);
        assert_eq!(RateConfig::Fixed(42).threshold(5000), 42);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[print]\nstyle = \"double\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.style, TableStyle::Double);
    }

    #[test]
    fn test_load_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, DigestError::ConfigRead { .. }));
    }
}
