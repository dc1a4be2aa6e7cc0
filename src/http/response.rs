//! Response construction.
//!
//! Status mapping:
//! - 200: converted list
//! - 404: no route for the path (body names the path)
//! - 403: any failure while converting, including a panic (body carries
//!   the diagnostic text)

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::convert::ConvertError;

pub fn converted(body: String) -> Response {
    (StatusCode::OK, body).into_response()
}

pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("Not found. Cannot dispatch the request with pathname {}", path),
    )
        .into_response()
}

pub fn conversion_error(err: &ConvertError) -> Response {
    (StatusCode::FORBIDDEN, err.diagnostic()).into_response()
}

/// Turn a caught panic payload into the catch-all error response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unrecognized panic payload".to_string()
    };

    tracing::error!(details = %details, "Handler panicked");
    (StatusCode::FORBIDDEN, format!("Unknown error: {}", details)).into_response()
}
