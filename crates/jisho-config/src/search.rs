use std::env;

use serde::{Deserialize, Serialize};

fn default_min_query_chars() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Shorter non-blank queries clear results instead of fetching
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl SearchConfig {
    pub fn new() -> Self {
        let min_query_chars = env::var("JISHO_MIN_QUERY_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_min_query_chars);

        Self { min_query_chars }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
        }
    }
}
