//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("WebSocket error: {0}")]
    Ws(#[from] WsError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// Text shown to the user in an error area.
    ///
    /// Backend and validation messages are passed through without the
    /// category prefix used by `Display`.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Http(e) => e.to_string(),
            SdkError::Validation(e) => e.to_string(),
            SdkError::Ws(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Client-side validation errors. These block a request before it is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please pick valid start/end datetimes (end > start).")]
    InvalidRange,

    #[error("{symbol} data is only available from {floor} onwards.")]
    BeforeDataFloor { symbol: String, floor: String },

    #[error("End time cannot be in the future for {symbol}.")]
    EndInFuture { symbol: String },

    #[error("Could not parse datetime: {0}")]
    UnparsableDateTime(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown interval: {0}")]
    UnknownInterval(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx response. `detail` is taken from a best-effort `{"detail": ...}` body.
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Timeout")]
    Timeout,
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => d.clone(),
        _ => format!("HTTP {}", status),
    }
}

impl HttpError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            HttpError::Timeout => None,
        }
    }

    /// Backend-provided detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            HttpError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// WebSocket errors.
#[derive(Error, Debug)]
pub enum WsError {
    /// The client already ran its one connection; open a new client instead.
    #[error("Connection already finished")]
    Finished,

    /// The close handshake did not finish in time; the task was aborted.
    #[error("Close did not complete within {0:?}; connection aborted")]
    CloseTimeout(std::time::Duration),

    #[error("Connection task failed: {0}")]
    Task(String),
}
