//! Error types for the connection facade.
//!
//! # Design
//! Each variant carries the underlying error unmodified — the facade adds no
//! context, wrapping, or translation of its own. Callers that need the
//! transport's or decoder's detail reach it through `source()`.

use std::error::Error;
use std::fmt;

/// Errors returned by `Connection` methods.
#[derive(Debug)]
pub enum ConnectionError {
    /// Connection, TLS, or timeout failure from the HTTP transport.
    Transport(ureq::Error),

    /// The request body could not be serialized to JSON.
    Encode(serde_json::Error),

    /// The response body is non-empty but is not valid JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Transport(e) => write!(f, "transport error: {e}"),
            ConnectionError::Encode(e) => write!(f, "request body encoding failed: {e}"),
            ConnectionError::Decode(e) => write!(f, "response body is not valid JSON: {e}"),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConnectionError::Transport(e) => Some(e),
            ConnectionError::Encode(e) | ConnectionError::Decode(e) => Some(e),
        }
    }
}

impl From<ureq::Error> for ConnectionError {
    fn from(e: ureq::Error) -> Self {
        ConnectionError::Transport(e)
    }
}
