//! Blocking HTTP request wrapper for the ArangoDB REST API.
//!
//! # Overview
//! `Connection` turns a (verb, path, body?, options?) tuple into one
//! synchronous HTTP round trip against
//! `{protocol}://{host}:{port}/_db/{database}{path}`, with basic auth on
//! every request and non-empty JSON response bodies decoded into
//! `serde_json::Value`. Nothing else: no retries, no pooling of its own,
//! no status-code interpretation — responses pass through as data.
//!
//! # Design
//! - `ConnectionConfig` is fixed at construction; `Connection` holds no
//!   mutable state.
//! - `RequestOptions` carries transport settings (timeout, extra headers)
//!   forwarded verbatim to ureq.
//! - `ApiResponse` pairs the raw transport response with an optional
//!   decoded payload; an empty body means the payload is absent.
//! - Transport and JSON errors propagate unmodified through
//!   `ConnectionError`.

pub mod connection;
pub mod error;
pub mod options;
pub mod response;

pub use connection::{Connection, ConnectionConfig};
pub use error::ConnectionError;
pub use options::RequestOptions;
pub use response::ApiResponse;
