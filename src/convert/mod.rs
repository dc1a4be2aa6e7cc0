//! Proxy list conversion subsystem.
//!
//! # Data Flow
//! ```text
//! inbound query string
//!     → request.rs (source url + passthrough headers)
//!     → source.rs (one upstream GET, parse `results`)
//!     → format.rs (filter valid, build lines, sort, assemble, base64)
//!     → response body
//! ```
//!
//! # Design Decisions
//! - Stateless: nothing survives a single conversion
//! - Any stage failing fails the whole conversion; there are no partial lists
//! - No retries and no caching of upstream documents

pub mod error;
pub mod format;
pub mod request;
pub mod source;

use std::time::Duration;

pub use error::{ConvertError, ConvertResult, ErrorKind};
pub use format::{encode_envelope, render_list, DestinationEntry};
pub use request::ConvertRequest;
pub use source::{fetch_source, parse_source, WebshareProxy};

use crate::config::{ConversionConfig, TimeoutConfig};
use crate::observability::metrics;

/// Runs the fetch → parse → format pipeline.
#[derive(Clone)]
pub struct Converter {
    client: reqwest::Client,
    config: ConversionConfig,
}

impl Converter {
    /// Create a converter with its own upstream client.
    pub fn new(config: ConversionConfig, timeouts: &TimeoutConfig) -> ConvertResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ConvertError::Client)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: ConversionConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Parse a raw query string using the configured header prefix.
    pub fn request_from_query(&self, query: Option<&str>) -> ConvertResult<ConvertRequest> {
        ConvertRequest::from_query(query, &self.config.header_prefix)
    }

    /// Convert the list named by `request`, returning the base64 body.
    pub async fn convert(&self, request: &ConvertRequest) -> ConvertResult<String> {
        let body = fetch_source(&self.client, request).await?;
        let proxies = parse_source(body)?;

        let text = render_list(&self.config.remarks_title, &proxies);
        let valid = proxies.iter().filter(|p| p.valid).count();
        metrics::record_entries(valid);

        tracing::info!(
            source_url = %request.source_url,
            records = proxies.len(),
            entries = valid,
            "Proxy list converted"
        );

        Ok(encode_envelope(&text))
    }
}
