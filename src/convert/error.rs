//! Conversion error definitions.

use std::error::Error as StdError;
use std::fmt::Write as _;

use thiserror::Error;

/// Errors that can occur while converting a proxy list.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The `url` query parameter is absent or empty.
    #[error("Expected \"url\" param does not exist or is empty.")]
    MissingParameter,

    /// A passthrough parameter could not be turned into an HTTP header.
    #[error("Invalid passthrough header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The upstream answered with a non-success status.
    #[error("Error in fetching {url} : {status} {reason}")]
    Fetch {
        url: String,
        status: u16,
        reason: String,
    },

    /// The upstream request could not be sent or its body not read.
    #[error("Error in requesting {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The shared upstream client could not be constructed.
    #[error("Failed to build upstream client")]
    Client(#[source] reqwest::Error),

    /// The upstream body is not UTF-8 text.
    #[error("Source document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The upstream body is not a proxy list document.
    #[error("Failed to parse source document")]
    Parse(#[from] serde_json::Error),
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Coarse error classes reported to callers and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    FetchFailure,
    ParseFailure,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingParameter => "missing_parameter",
            ErrorKind::FetchFailure => "fetch_failure",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::MissingParameter => ErrorKind::MissingParameter,
            ConvertError::Fetch { .. } => ErrorKind::FetchFailure,
            ConvertError::Utf8(_) | ConvertError::Parse(_) => ErrorKind::ParseFailure,
            ConvertError::InvalidHeader { .. }
            | ConvertError::Request { .. }
            | ConvertError::Client(_) => ErrorKind::Unknown,
        }
    }

    /// The error message followed by its whole `source()` chain.
    pub fn diagnostic(&self) -> String {
        let mut out = format!("Error: {}", self);
        let mut source = self.source();
        while let Some(cause) = source {
            let _ = write!(out, "\n    caused by: {}", cause);
            source = cause.source();
        }
        out
    }
}
