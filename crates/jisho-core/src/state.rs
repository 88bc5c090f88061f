use std::sync::Arc;

use jisho_types::{Entry, Query};

/// Everything the presentation reads from a search controller
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub query: Query,
    /// Empty both before a search and when nothing matched
    pub results: Arc<[Entry]>,
    /// A fetch for the current generation is outstanding
    pub pending: bool,
    pub generation: u64,
    /// Message from the last failed fetch, for diagnostics only
    pub last_error: Option<String>,
}

impl SearchSnapshot {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
