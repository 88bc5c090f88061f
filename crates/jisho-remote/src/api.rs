use std::time::Duration;

use async_trait::async_trait;
use jisho_core::{LookupError, LookupMetadata, RemoteLookup};
use jisho_types::Entry;
use serde::Deserialize;

use crate::{build_client, check_status, transport_error};

const API_PATH: &str = "api/v1/search/words";

/// Client for the JSON word search API
#[derive(Clone)]
pub struct JishoApi {
    client: reqwest::Client,
    base_url: String,
}

impl JishoApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), API_PATH)
    }
}

#[async_trait]
impl RemoteLookup for JishoApi {
    async fn fetch(&self, query: &str, page: u32) -> Result<Vec<Entry>, LookupError> {
        tracing::debug!("API search: '{}' (page {})", query, page);

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("keyword", query)])
            .query(&[("page", page)])
            .send()
            .await
            .map_err(transport_error)?;

        check_status(&response)?;

        let body = response.text().await.map_err(transport_error)?;
        parse_search_json(&body)
    }

    fn metadata(&self) -> LookupMetadata {
        LookupMetadata {
            name: "jisho-api".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    data: Vec<serde_json::Value>,
}

/// Parse a `{ data: [...] }` search response
///
/// Missing fields default; an entry that still doesn't fit is skipped.
pub fn parse_search_json(body: &str) -> Result<Vec<Entry>, LookupError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;

    let entries = response
        .data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Entry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed entry: {}", e);
                None
            }
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIHONGO: &str = r#"{
        "meta": {"status": 200},
        "data": [{
            "slug": "日本語",
            "is_common": true,
            "tags": ["wanikani5"],
            "jlpt": ["jlpt-n5"],
            "japanese": [{"word": "日本語", "reading": "にほんご"}],
            "senses": [{
                "english_definitions": ["Japanese (language)"],
                "parts_of_speech": ["Noun"],
                "links": [],
                "tags": [],
                "see_also": [],
                "info": []
            }],
            "attribution": {"jmdict": true, "jmnedict": false, "dbpedia": false}
        }]
    }"#;

    #[test]
    fn parses_search_response() {
        let entries = parse_search_json(NIHONGO).unwrap();

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.slug, "日本語");
        assert!(entry.is_common);
        assert_eq!(entry.japanese[0].word.as_deref(), Some("日本語"));
        assert_eq!(entry.japanese[0].reading, "にほんご");
        assert_eq!(entry.senses[0].parts_of_speech, ["Noun"]);
        assert_eq!(entry.senses[0].english_definitions, ["Japanese (language)"]);
    }

    #[test]
    fn missing_data_is_empty() {
        assert!(parse_search_json("{}").unwrap().is_empty());
        assert!(parse_search_json(r#"{"data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_entry_is_skipped() {
        let body = r#"{"data": [{"slug": 5}, {"slug": "から"}]}"#;
        let entries = parse_search_json(body).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "から");
    }

    #[test]
    fn invalid_body_is_parse_error() {
        let err = parse_search_json("<html>").unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let api = JishoApi::new("https://jisho.org/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.endpoint(), "https://jisho.org/api/v1/search/words");
    }
}
