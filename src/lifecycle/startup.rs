//! Startup orchestration.
//!
//! Initialization order: metrics exporter, converter and routes, listener.
//! The listener binds last so traffic arrives only once everything is ready.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ConverterConfig;
use crate::convert::ConvertError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Fatal errors while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Failed to initialize converter: {0}")]
    Converter(#[from] ConvertError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_addr(address: &str) -> Result<SocketAddr, StartupError> {
    address.parse().map_err(|source| StartupError::Address {
        address: address.to_string(),
        source,
    })
}

/// Bring the service up and serve until SIGINT/SIGTERM.
pub async fn serve(config: ConverterConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(parse_addr(&config.observability.metrics_address)?)?;
    }

    let bind_address = parse_addr(&config.listener.bind_address)?;
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::forward_to(shutdown);

    server.run(listener, server_shutdown).await?;
    Ok(())
}
