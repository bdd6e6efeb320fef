//! Response wrapper returned by every `Connection` method.
//!
//! # Design
//! The transport's native response cannot grow extra fields, so the decoded
//! payload lives alongside the raw data in an explicit wrapper. All fields
//! are owned so responses can be moved around and inspected after the
//! transport stream is gone.

use serde_json::Value;

use crate::error::ConnectionError;

/// An HTTP response plus its decoded JSON payload, if any.
///
/// `decoded` is `Some` only when the raw body is non-empty and the request
/// method expects a semantic body (everything except HEAD). An empty body
/// yields `None`, never `Value::Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Raw response text, exactly as received.
    pub body: String,
    /// Parsed JSON body, absent when the body is empty or the method was HEAD.
    pub decoded: Option<Value>,
}

/// Decode a raw response body per the facade's contract: empty means absent,
/// non-empty must parse or the call fails.
pub(crate) fn decode_body(body: &str) -> Result<Option<Value>, ConnectionError> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body).map(Some).map_err(ConnectionError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_decodes_to_absent() {
        assert!(decode_body("").unwrap().is_none());
    }

    #[test]
    fn json_body_decodes_to_value() {
        let decoded = decode_body(r#"{"error":false,"code":200}"#).unwrap();
        assert_eq!(decoded, Some(json!({"error": false, "code": 200})));
    }

    #[test]
    fn json_null_body_is_present_not_absent() {
        // A body containing the literal `null` is still a decoded value.
        let decoded = decode_body("null").unwrap();
        assert_eq!(decoded, Some(Value::Null));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_body("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ConnectionError::Decode(_)));
    }

    #[test]
    fn decode_of_encoded_value_roundtrips() {
        let original = json!({"name": "users", "waitForSync": true, "count": 3});
        let encoded = serde_json::to_string(&original).unwrap();
        assert_eq!(decode_body(&encoded).unwrap(), Some(original));
    }
}
