//! YAML configuration for blocklist runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::source::{default_user_agent, is_http_url, BlocklistSource, FetchOptions};

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Timeout for blocklist downloads (e.g. "30s", "2m")
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub http_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Output rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// List rejected lines in the text report
    #[serde(default = "default_true")]
    pub include_rejected: bool,
}

/// How results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with valid entries and invalid lines
    #[default]
    Text,
    /// JSON document with every entry and rejected line
    Json,
    /// One CIDR per line, ready for a firewall
    Cidr,
}

/// One configured blocklist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceConfig {
    /// Build the source this entry points at; call after validation
    pub fn to_source(&self) -> Option<BlocklistSource> {
        match (&self.path, &self.url) {
            (Some(path), None) => Some(BlocklistSource::File(path.clone())),
            (None, Some(url)) => Some(BlocklistSource::Url(url.clone())),
            _ => None,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid source configuration: {0}")]
    InvalidSource(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.http_timeout.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "http_timeout must be greater than zero".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            Self::validate_source(source)?;
            if !names.insert(source.name.as_str()) {
                return Err(ValidationError::InvalidSource(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
        }

        Ok(())
    }

    fn validate_source(source: &SourceConfig) -> Result<(), ValidationError> {
        if source.name.trim().is_empty() {
            return Err(ValidationError::InvalidSource(
                "source name cannot be empty".to_string(),
            ));
        }

        match (&source.path, &source.url) {
            (Some(_), Some(_)) => Err(ValidationError::InvalidSource(format!(
                "source '{}' must set only one of 'path' or 'url'",
                source.name
            ))),
            (None, None) => Err(ValidationError::InvalidSource(format!(
                "source '{}' must set 'path' or 'url'",
                source.name
            ))),
            (None, Some(url)) if !is_http_url(url) => {
                Err(ValidationError::InvalidSource(format!(
                    "source '{}' url must use http or https: {}",
                    source.name, url
                )))
            }
            _ => Ok(()),
        }
    }

    /// Download settings derived from the general section
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.general.http_timeout,
            user_agent: self.general.user_agent.clone(),
        }
    }
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

/// Default implementations
impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            http_timeout: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_rejected: true,
        }
    }
}
