//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (request ID, tracing, timeout, panic recovery)
//! - Dispatch matched paths to the converter, everything else to 404
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Uri,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ConverterConfig;
use crate::convert::{ConvertResult, Converter};
use crate::http::request::{make_request_span, MakeRequestUuid};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{Endpoint, Router as RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub converter: Converter,
}

/// HTTP server for the converter.
pub struct HttpServer {
    router: Router,
    config: ConverterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ConverterConfig) -> ConvertResult<Self> {
        let converter = Converter::new(config.conversion.clone(), &config.timeouts)?;
        Ok(Self::with_converter(config, converter))
    }

    /// Create a server around an existing converter.
    pub fn with_converter(config: ConverterConfig, converter: Converter) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&config.routes)),
            converter,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run top to bottom: the request id must exist before the trace
    /// span records it.
    #[allow(deprecated)]
    fn build_router(config: &ConverterConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(response::panic_response))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered router, for serving or driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            convert_suffix = %self.config.routes.convert_suffix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: only the path decides where a request goes.
async fn dispatch(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    let path = uri.path();

    let endpoint = match state.routes.match_path(path) {
        Some(route) => route.endpoint,
        None => {
            tracing::warn!(path = %path, "No route matched");
            metrics::record_request("none", 404, start);
            return response::not_found(path);
        }
    };

    let response = match endpoint {
        Endpoint::Convert => convert(&state.converter, uri.query()).await,
    };

    metrics::record_request(endpoint.name(), response.status().as_u16(), start);
    response
}

async fn convert(converter: &Converter, query: Option<&str>) -> Response {
    match run_conversion(converter, query).await {
        Ok(body) => response::converted(body),
        Err(e) => {
            let kind = e.kind().as_str();
            tracing::warn!(kind, error = %e, "Conversion failed");
            metrics::record_error(kind);
            response::conversion_error(&e)
        }
    }
}

async fn run_conversion(converter: &Converter, query: Option<&str>) -> ConvertResult<String> {
    let request = converter.request_from_query(query)?;
    converter.convert(&request).await
}
