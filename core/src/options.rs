//! Per-request transport options.

use std::time::Duration;

/// Transport-level settings forwarded verbatim to the HTTP layer.
///
/// The facade does not interpret these: the timeout is enforced by the
/// transport (no timeout at all when unset), and extra headers are sent
/// as given. Options apply to a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeout_and_no_headers() {
        let opts = RequestOptions::new();
        assert!(opts.timeout.is_none());
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn builder_accumulates_headers() {
        let opts = RequestOptions::new()
            .timeout(Duration::from_secs(5))
            .header("if-none-match", "\"_rev1\"")
            .header("x-arango-async", "true");
        assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
        assert_eq!(opts.headers.len(), 2);
        assert_eq!(opts.headers[0].0, "if-none-match");
    }
}
