//! Transport trait and the request/response values it exchanges.

use crate::error::Result;
use async_trait::async_trait;
use rota_core::ApiError;
use std::collections::HashMap;

/// An outgoing HTTP request
///
/// Represents an HTTP request to be sent via the Transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add an `Authorization: Bearer` header
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type`
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized
    pub fn with_json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }
}

/// HTTP response
///
/// Represents an HTTP response received from the server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse response body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the response body cannot be parsed as valid JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get a header value by name (case-insensitive)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Turn a non-2xx response into an [`ApiError`].
    ///
    /// The body becomes the message; a `retry-after` header is parsed as a
    /// signed number of seconds and kept as-is.
    ///
    /// ```rust
    /// use rota_transport::HttpResponse;
    /// use std::collections::HashMap;
    ///
    /// let headers = HashMap::from([("Retry-After".to_string(), "5".to_string())]);
    /// let response = HttpResponse::new(429, headers, b"slow down".to_vec());
    ///
    /// let err = response.error_for_status().unwrap_err();
    /// assert_eq!(err.status, 429);
    /// assert_eq!(err.retry_after_secs, Some(5));
    /// assert_eq!(err.message, "slow down");
    /// ```
    pub fn error_for_status(self) -> std::result::Result<Self, ApiError> {
        if self.is_success() {
            return Ok(self);
        }

        let retry_after = self
            .get_header("retry-after")
            .and_then(ApiError::parse_retry_after);
        let mut err = ApiError::new(self.status, self.text());
        err.retry_after_secs = retry_after;
        Err(err)
    }
}

/// Generic transport trait
///
/// Implementations make exactly one attempt per call; retries belong to
/// the invoker.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an HTTP request and receive a response of any status
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HttpResponse::new(status, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_success_passes_through() {
        let ok = response(204, &[], "").error_for_status().unwrap();
        assert_eq!(ok.status, 204);
    }

    #[test]
    fn test_error_for_status_without_retry_after() {
        let err = response(404, &[], "no such conversation")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err, ApiError::new(404, "no such conversation"));
    }

    #[test]
    fn test_error_for_status_keeps_raw_retry_after() {
        let err = response(429, &[("retry-after", "-2")], "")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.retry_after_secs, Some(-2));

        let err = response(429, &[("Retry-After", "tomorrow")], "")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.retry_after_secs, None);
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let request = HttpRequest::new("POST", "https://example.com")
            .with_json(&serde_json::json!({ "phoneNumber": "+441234" }))
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.unwrap(), br#"{"phoneNumber":"+441234"}"#.to_vec());
    }

    #[test]
    fn test_get_header_case_insensitive() {
        let resp = response(200, &[("Content-Type", "application/json")], "{}");
        assert_eq!(resp.get_header("content-type"), Some("application/json"));
        assert_eq!(resp.get_header("x-missing"), None);
    }
}
