//! Webshare proxy list to Shadowrocket subscription converter.
//!
//! A stateless HTTP service: `GET /convert?url=...&p-Authorization=...`
//! fetches a Webshare proxy list, keeps the valid proxies, and answers with
//! a base64 Shadowrocket subscription.

pub mod config;
pub mod convert;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ConverterConfig;
pub use convert::Converter;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
