//! Upstream proxy list: record shape, fetching and parsing.
//!
//! The upstream is Webshare's list endpoint
//! (`GET /api/v2/proxy/list/?mode=direct`), which answers with a paginated
//! JSON document whose `results` array holds the proxies.

use std::time::Instant;

use serde::Deserialize;

use crate::convert::error::{ConvertError, ConvertResult};
use crate::convert::request::ConvertRequest;
use crate::observability::metrics;

/// One proxy as listed by the upstream provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WebshareProxy {
    /// e.g. `d-10513`
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub proxy_address: String,
    pub port: u16,
    pub valid: bool,
    #[serde(default)]
    pub last_verification: Option<String>,
    /// Two-letter country code, e.g. `US`.
    pub country_code: String,
    pub city_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The upstream list document. Pagination fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SourceDocument {
    pub results: Vec<WebshareProxy>,
}

/// Decode a fetched body into its proxy records.
pub fn parse_source(body: Vec<u8>) -> ConvertResult<Vec<WebshareProxy>> {
    let text = String::from_utf8(body)?;
    let document: SourceDocument = serde_json::from_str(&text)?;
    Ok(document.results)
}

/// Fetch the upstream document named by `request`.
///
/// Exactly one GET is issued; a non-success status is an error and is not
/// retried.
pub async fn fetch_source(client: &reqwest::Client, request: &ConvertRequest) -> ConvertResult<Vec<u8>> {
    let url = request.source_url.as_str();
    let start = Instant::now();

    tracing::debug!(
        source_url = %url,
        headers = ?request.headers.keys().collect::<Vec<_>>(),
        "Fetching source list"
    );

    let response = client
        .get(url)
        .headers(request.headers.clone())
        .send()
        .await
        .map_err(|source| ConvertError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    metrics::record_upstream_fetch(status.as_u16(), start);

    if !status.is_success() {
        tracing::warn!(source_url = %url, status = status.as_u16(), "Upstream returned failure status");
        return Err(ConvertError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let body = response.bytes().await.map_err(|source| ConvertError::Request {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!(source_url = %url, bytes = body.len(), "Source list fetched");
    Ok(body.to_vec())
}
