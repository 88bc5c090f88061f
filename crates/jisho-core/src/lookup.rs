use jisho_types::Entry;

/// Remote source of dictionary entries
#[async_trait::async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Fetch one page of entries for `query`; pages start at 1
    async fn fetch(&self, query: &str, page: u32) -> Result<Vec<Entry>, LookupError>;

    /// Source metadata
    fn metadata(&self) -> LookupMetadata;
}

#[derive(Debug, Clone)]
pub struct LookupMetadata {
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
