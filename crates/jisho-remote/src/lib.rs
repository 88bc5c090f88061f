mod api;
mod backend;
mod html;

pub use api::{JishoApi, parse_search_json};
pub use backend::Backend;
pub use html::{JishoScraper, Meaning, ScrapedEntry, parse_search_html};

use std::time::Duration;

use jisho_core::LookupError;

/// Shared HTTP client with the round trip budget applied
fn build_client(timeout: Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jisho-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(transport_error)
}

fn transport_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else if let Some(status) = e.status() {
        LookupError::Status(status.as_u16())
    } else if e.is_decode() {
        LookupError::Parse(e.to_string())
    } else {
        LookupError::Network(e.to_string())
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), LookupError> {
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }
    Ok(())
}
