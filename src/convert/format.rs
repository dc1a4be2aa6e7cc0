//! Destination format: Shadowrocket-style subscription text.
//!
//! Decoded, a list looks like:
//!
//! ```text
//! REMARKS=Webshare Proxies
//! socks://dXNlcjpwYXNzQDEuMi4zLjQ6ODE2OA==?remarks=New%20York%3A%201.2.3.4&obfs=none&tfo=1
//! ```
//!
//! and is served base64-encoded as a whole.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::convert::source::WebshareProxy;

/// One formatted output line with the key it is ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationEntry {
    /// `{country_code} {city_name}: {proxy_address}`
    pub sort_key: String,
    pub line: String,
}

impl DestinationEntry {
    pub fn from_proxy(proxy: &WebshareProxy) -> Self {
        let sort_key = format!("{} {}: {}", proxy.country_code, proxy.city_name, proxy.proxy_address);
        let display_name = format!("{}: {}", proxy.city_name, proxy.proxy_address);
        let credentials = format!(
            "{}:{}@{}:{}",
            proxy.username, proxy.password, proxy.proxy_address, proxy.port
        );

        let line = format!(
            "socks://{}?remarks={}&obfs=none&tfo=1",
            STANDARD.encode(credentials),
            urlencoding::encode(&display_name)
        );

        Self { sort_key, line }
    }
}

/// Filter, order and assemble the plain-text list.
///
/// Only valid proxies are emitted. Ties on the sort key keep input order.
pub fn render_list(title: &str, proxies: &[WebshareProxy]) -> String {
    let mut entries: Vec<DestinationEntry> = proxies
        .iter()
        .filter(|p| p.valid)
        .map(DestinationEntry::from_proxy)
        .collect();
    entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

    let mut text = format!("REMARKS={}\n", title);
    let lines: Vec<&str> = entries.iter().map(|e| e.line.as_str()).collect();
    text.push_str(&lines.join("\n"));
    text
}

/// Base64 envelope around the whole assembled list.
pub fn encode_envelope(text: &str) -> String {
    STANDARD.encode(text)
}
