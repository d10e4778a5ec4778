//! Configuration from `RULEKIT_*` environment variables.
//!
//! A `.env` file in the working directory is loaded first; variables already
//! set in the environment take precedence over it.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// CLI settings.
///
/// | Variable | Field |
/// |---|---|
/// | `RULEKIT_LOG` | log filter, default `info` |
/// | `RULEKIT_LOG_FORMAT` | `compact` or `json` |
/// | `RULEKIT_MESSAGES` | default custom messages file for `check` |
/// | `RULEKIT_RECORDS` | default lookup fixture for `check` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_log")]
    pub log: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub messages: Option<PathBuf>,
    #[serde(default)]
    pub records: Option<PathBuf>,
}

fn default_log() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log: default_log(),
            log_format: LogFormat::default(),
            messages: None,
            records: None,
        }
    }
}

impl CliConfig {
    /// Load `.env`, then read `RULEKIT_*` variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        let _ = dotenvy::dotenv();
        envy::prefixed("RULEKIT_").from_env()
    }

    /// Read `RULEKIT_*` variables from an explicit list.
    #[cfg(test)]
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("RULEKIT_").from_iter(vars)
    }
}
