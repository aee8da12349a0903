//! Configuration management for the shell.

use memquery::Options;
use std::env;

/// Shell configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth accepted in a query
    pub max_query_depth: usize,
    /// Pretty-print replies
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_query_depth: memquery::options::DEFAULT_MAX_QUERY_DEPTH,
            pretty: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("MEMQUERY_MAX_QUERY_DEPTH").ok(),
            env::var("MEMQUERY_PRETTY").ok(),
        )
    }

    fn from_vars(max_query_depth: Option<String>, pretty: Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_query_depth = match max_query_depth {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMaxQueryDepth(raw.clone()))?,
            None => defaults.max_query_depth,
        };

        let pretty = match pretty.as_deref().map(str::trim) {
            None | Some("") => defaults.pretty,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => return Err(ConfigError::InvalidPretty(other.to_string())),
        };

        Ok(Self {
            max_query_depth,
            pretty,
        })
    }

    /// Engine options derived from this configuration.
    pub fn options(&self) -> Options {
        Options::default().with_max_query_depth(self.max_query_depth)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MEMQUERY_MAX_QUERY_DEPTH value: {0}")]
    InvalidMaxQueryDepth(String),

    #[error("Invalid MEMQUERY_PRETTY value: {0}")]
    InvalidPretty(String),
}
