//! Inbound query extraction.
//!
//! A conversion request is carried entirely in the query string:
//! `url` names the upstream list and every `p-<Name>=<value>` parameter is
//! replayed upstream as a `<Name>: <value>` header.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::convert::error::{ConvertError, ConvertResult};

/// Query parameter holding the upstream URL.
pub const SOURCE_URL_PARAM: &str = "url";

/// Everything needed to fetch one upstream list.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub source_url: String,
    pub headers: HeaderMap,
}

impl ConvertRequest {
    pub fn new(source_url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            source_url: source_url.into(),
            headers,
        }
    }

    /// Build a request from a raw (still percent-encoded) query string.
    ///
    /// Parameters are scanned once, in order. The first `url` wins; a later
    /// passthrough header with the same name replaces an earlier one.
    pub fn from_query(query: Option<&str>, header_prefix: &str) -> ConvertResult<Self> {
        let mut source_url = None;
        let mut headers = HeaderMap::new();

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if key == SOURCE_URL_PARAM {
                if source_url.is_none() {
                    source_url = Some(value.into_owned());
                }
                continue;
            }
            if let Some(name) = key.strip_prefix(header_prefix) {
                let (name, value) = passthrough_header(name, &value)?;
                headers.insert(name, value);
            }
        }

        match source_url {
            Some(url) if !url.is_empty() => Ok(Self::new(url, headers)),
            _ => Err(ConvertError::MissingParameter),
        }
    }
}

/// Validate one passthrough pair as an HTTP header.
pub fn passthrough_header(name: &str, value: &str) -> ConvertResult<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConvertError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| ConvertError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((header_name, header_value))
}
