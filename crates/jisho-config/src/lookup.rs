use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "https://jisho.org".to_string()
}

fn default_timeout_ms() -> u64 {
    24_000
}

/// Which remote source entries are fetched from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Structured JSON search API
    #[default]
    Api,
    /// HTML search results page
    Scrape,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(BackendKind::Api),
            "scrape" | "html" => Ok(BackendKind::Scrape),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Api => f.write_str("api"),
            BackendKind::Scrape => f.write_str("scrape"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub backend: BackendKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Round trip budget for one fetch
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl LookupConfig {
    pub fn new() -> Self {
        let backend = env::var("JISHO_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let base_url = env::var("JISHO_BASE_URL").unwrap_or_else(|_| default_base_url());

        let timeout_ms = env::var("JISHO_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_ms);

        Self {
            backend,
            base_url,
            timeout_ms,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
