//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the converter.
//! All types derive Serde traits for deserialization from config files, and
//! every section defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the converter service.
///
/// Passed explicitly into the server and the converter; nothing reads
/// configuration from globals.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Endpoint routing.
    pub routes: RoutesConfig,

    /// Conversion settings (passthrough prefix, output title).
    pub conversion: ConversionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Route table configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Any request path ending with this suffix is dispatched to the converter.
    pub convert_suffix: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            convert_suffix: "/convert".to_string(),
        }
    }
}

/// Conversion settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConversionConfig {
    /// Query parameters starting with this prefix become upstream headers.
    pub header_prefix: String,

    /// Title written on the `REMARKS=` header line of the output.
    pub remarks_title: String,

    /// Default User-Agent for upstream fetches.
    pub user_agent: String,

    /// Route upstream fetches through `HTTP_PROXY`/`HTTPS_PROXY` when set.
    pub use_system_proxy: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            header_prefix: "p-".to_string(),
            remarks_title: "Webshare Proxies".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one inbound request, in seconds.
    pub request_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
