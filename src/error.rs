//! Error types for the probe client.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors produced by the probe client.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// HTTP transport or request-construction failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The login endpoint answered with something other than 200.
    #[error("login failed with status {status}")]
    LoginFailed {
        /// Status code returned by the server.
        status: reqwest::StatusCode,
    },

    /// A tool call was attempted before a successful login.
    #[error("tool call attempted before login for this session")]
    NotLoggedIn,

    /// WebSocket handshake or frame-level failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The WebSocket handshake did not complete within the fixed timeout.
    #[error("websocket handshake timed out")]
    HandshakeTimeout,

    /// The session identifier cannot be carried in an HTTP header.
    #[error("invalid header value: {0}")]
    Header(#[from] tokio_tungstenite::tungstenite::http::header::InvalidHeaderValue),

    /// JSON serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Interactive input did not name a known tool.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The local test-data file could not be read.
    #[error("failed to read test data {}: {}", path.display(), source)]
    TestData {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// Console or other I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
