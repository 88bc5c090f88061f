use std::path::Path;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::search::SearchConfig;

pub mod lookup;
pub mod search;

pub use lookup::BackendKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        Config {
            lookup: LookupConfig::new(),
            search: SearchConfig::new(),
        }
    }

    /// Load a JSON profile; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_keeps_defaults() {
        let config = Config::from_json(r#"{"lookup":{"backend":"scrape"}}"#).unwrap();

        assert_eq!(config.lookup.backend, BackendKind::Scrape);
        assert_eq!(config.lookup.base_url, "https://jisho.org");
        assert_eq!(config.lookup.timeout_ms, 24_000);
        assert_eq!(config.search.min_query_chars, 1);
    }

    #[test]
    fn malformed_profile_is_an_error() {
        let err = Config::from_json("{ lookup: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
