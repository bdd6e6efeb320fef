//! Blocking HTTP connection facade for the ArangoDB REST API.
//!
//! # Design
//! `Connection` owns an immutable `ConnectionConfig` and one `ureq::Agent`,
//! and exposes one method per HTTP verb. Each call is a single stateless
//! round trip: build the target URL from the configured prefix plus the
//! caller's path, attach basic auth, forward the caller's transport options
//! verbatim, and decode any non-empty response body as JSON. Status codes
//! are returned as data, never interpreted — the agent is configured with
//! `http_status_as_error(false)` so 4xx/5xx responses come back like any
//! other.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use ureq::typestate::WithBody;
use ureq::Agent;

use crate::error::ConnectionError;
use crate::options::RequestOptions;
use crate::response::{decode_body, ApiResponse};

/// Connection settings, fixed at construction time.
///
/// All six fields are optional at the call site: `Default` gives the
/// stock local-server setup (`http://localhost:8529`, user `root` with an
/// empty password, database `_system`), and the consuming setters override
/// individual fields.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: 8529,
            username: "root".to_string(),
            password: String::new(),
            database: "_system".to_string(),
        }
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }
}

/// Synchronous, stateless request wrapper for one ArangoDB database.
///
/// Every method blocks until the transport returns or fails. The connection
/// holds no mutable state, so sharing it across threads is safe to the
/// extent the underlying agent is.
#[derive(Clone)]
pub struct Connection {
    config: ConnectionConfig,
    agent: Agent,
}

impl Connection {
    pub fn new(config: ConnectionConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { config, agent }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The URL prefix shared by every request:
    /// `{protocol}://{host}:{port}/_db/{database}`.
    pub fn url_prefix(&self) -> String {
        format!(
            "{}://{}:{}/_db/{}",
            self.config.protocol, self.config.host, self.config.port, self.config.database
        )
    }

    /// Execute an HTTP HEAD request. The response body is never decoded.
    pub fn head(&self, path: &str, options: &RequestOptions) -> Result<ApiResponse, ConnectionError> {
        let req = self.apply(self.agent.head(&self.target(path)), options);
        finish(req.call()?, false)
    }

    /// Execute an HTTP GET request.
    pub fn get(&self, path: &str, options: &RequestOptions) -> Result<ApiResponse, ConnectionError> {
        let req = self.apply(self.agent.get(&self.target(path)), options);
        finish(req.call()?, true)
    }

    /// Execute an HTTP PUT request with an optional JSON body.
    pub fn put(
        &self,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ConnectionError> {
        self.send_payload(self.agent.put(&self.target(path)), body, options)
    }

    /// Execute an HTTP POST request with an optional JSON body.
    pub fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ConnectionError> {
        self.send_payload(self.agent.post(&self.target(path)), body, options)
    }

    /// Execute an HTTP PATCH request with an optional JSON body.
    pub fn patch(
        &self,
        path: &str,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ConnectionError> {
        self.send_payload(self.agent.patch(&self.target(path)), body, options)
    }

    /// Execute an HTTP DELETE request.
    pub fn delete(&self, path: &str, options: &RequestOptions) -> Result<ApiResponse, ConnectionError> {
        let req = self.apply(self.agent.delete(&self.target(path)), options);
        finish(req.call()?, true)
    }

    /// Prefix plus caller path, passed through as-is — no escaping, no
    /// normalization. Callers supply the leading slash.
    fn target(&self, path: &str) -> String {
        format!("{}{}", self.url_prefix(), path)
    }

    fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.config.username, self.config.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Attach auth and the caller's transport options to a request builder.
    fn apply<Any>(
        &self,
        mut req: ureq::RequestBuilder<Any>,
        options: &RequestOptions,
    ) -> ureq::RequestBuilder<Any> {
        req = req.header("authorization", self.basic_auth());
        for (name, value) in &options.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            req = req.config().timeout_global(Some(timeout)).build();
        }
        req
    }

    fn send_payload(
        &self,
        req: ureq::RequestBuilder<WithBody>,
        body: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ConnectionError> {
        let req = self.apply(req, options);
        let response = match body {
            Some(value) => {
                let payload = serde_json::to_string(value).map_err(ConnectionError::Encode)?;
                req.content_type("application/json").send(payload.as_bytes())?
            }
            None => req.send_empty()?,
        };
        finish(response, true)
    }
}

/// Drain a transport response into an `ApiResponse`, decoding the body only
/// for methods that expect one.
fn finish(
    mut response: ureq::http::Response<ureq::Body>,
    decode: bool,
) -> Result<ApiResponse, ConnectionError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.body_mut().read_to_string()?;
    let decoded = if decode { decode_body(&body)? } else { None };
    Ok(ApiResponse {
        status,
        headers,
        body,
        decoded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_stock_server() {
        let config = ConnectionConfig::default();
        assert_eq!(config.protocol, "http");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8529);
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "");
        assert_eq!(config.database, "_system");
    }

    #[test]
    fn url_prefix_from_default_config() {
        let conn = Connection::new(ConnectionConfig::default());
        assert_eq!(conn.url_prefix(), "http://localhost:8529/_db/_system");
    }

    #[test]
    fn url_prefix_from_custom_config() {
        let config = ConnectionConfig::new()
            .protocol("https")
            .host("db.internal")
            .port(8530)
            .database("inventory");
        let conn = Connection::new(config);
        assert_eq!(conn.url_prefix(), "https://db.internal:8530/_db/inventory");
    }

    #[test]
    fn target_appends_path_verbatim() {
        let conn = Connection::new(ConnectionConfig::default());
        assert_eq!(
            conn.target("/_api/collection/users"),
            "http://localhost:8529/_db/_system/_api/collection/users"
        );
        // No normalization: a doubled slash passes through untouched.
        assert_eq!(
            conn.target("//_api/version"),
            "http://localhost:8529/_db/_system//_api/version"
        );
    }

    #[test]
    fn basic_auth_for_default_credentials() {
        let conn = Connection::new(ConnectionConfig::default());
        // base64("root:")
        assert_eq!(conn.basic_auth(), "Basic cm9vdDo=");
    }

    #[test]
    fn basic_auth_for_custom_credentials() {
        let config = ConnectionConfig::new().username("user").password("pass");
        let conn = Connection::new(config);
        // base64("user:pass")
        assert_eq!(conn.basic_auth(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn setters_leave_other_fields_at_defaults() {
        let config = ConnectionConfig::new().database("audit");
        assert_eq!(config.database, "audit");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8529);
    }
}
