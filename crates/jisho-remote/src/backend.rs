use std::time::Duration;

use async_trait::async_trait;
use jisho_config::BackendKind;
use jisho_config::lookup::LookupConfig;
use jisho_core::{LookupError, LookupMetadata, RemoteLookup};
use jisho_types::Entry;

use crate::{JishoApi, JishoScraper};

/// Remote source picked once when the app is composed
#[derive(Clone)]
pub enum Backend {
    Api(JishoApi),
    Scrape(JishoScraper),
}

impl Backend {
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        let backend = match config.backend {
            BackendKind::Api => Backend::Api(JishoApi::new(config.base_url.clone(), timeout)?),
            BackendKind::Scrape => {
                Backend::Scrape(JishoScraper::new(config.base_url.clone(), timeout)?)
            }
        };

        tracing::info!(
            "Using {} backend at {} (timeout {:?})",
            config.backend,
            config.base_url,
            timeout
        );

        Ok(backend)
    }
}

#[async_trait]
impl RemoteLookup for Backend {
    async fn fetch(&self, query: &str, page: u32) -> Result<Vec<Entry>, LookupError> {
        match self {
            Backend::Api(api) => api.fetch(query, page).await,
            Backend::Scrape(scraper) => scraper.fetch(query, page).await,
        }
    }

    fn metadata(&self) -> LookupMetadata {
        match self {
            Backend::Api(api) => api.metadata(),
            Backend::Scrape(scraper) => scraper.metadata(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_configured_backend() {
        let mut config = LookupConfig::default();
        let backend = Backend::from_config(&config).unwrap();
        assert!(matches!(backend, Backend::Api(_)));
        assert_eq!(backend.metadata().name, "jisho-api");

        config.backend = BackendKind::Scrape;
        config.base_url = "http://localhost:8080".to_string();
        let backend = Backend::from_config(&config).unwrap();
        assert!(matches!(backend, Backend::Scrape(_)));
        assert_eq!(backend.metadata().base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_lookup_error() {
        let config = LookupConfig {
            backend: BackendKind::Api,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 2_000,
        };
        let backend = Backend::from_config(&config).unwrap();

        let err = backend.fetch("kara", 1).await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_) | LookupError::Timeout));
    }
}
