//! HTTP transport for the analysis client
//!
//! Synchronous blocking HTTP behind a trait so the client can be exercised
//! with fixture responses instead of real network calls. Uses ureq for
//! blocking I/O.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Transport errors
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _response) => TransportError::Http {
                status: code,
                message: format!("HTTP {}", code),
            },
            ureq::Error::Transport(err) => TransportError::Network(err.to_string()),
        }
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client to enable testing with FakeTransport.
pub trait SyncTransport: Send + Sync {
    /// POST JSON request and return response body
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError>;
}

/// Real HTTP transport using ureq
#[derive(Debug)]
pub struct UreqTransport {
    /// Timeout in seconds for requests
    timeout: u64,
}

impl UreqTransport {
    /// Create new transport with default timeout (30s)
    pub fn new() -> Self {
        Self { timeout: 30 }
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout: timeout_secs,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError> {
        let mut request =
            ureq::request("POST", url).timeout(std::time::Duration::from_secs(self.timeout));

        for (key, value) in headers {
            request = request.set(key, value);
        }

        let response = request.send_string(body)?;

        let status = response.status();
        if status >= 400 {
            return Err(TransportError::Http {
                status,
                message: format!("HTTP {}", status),
            });
        }

        let body = response
            .into_string()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(body)
    }
}

/// Fake transport for testing (uses fixture strings)
///
/// Counts calls so tests can assert exactly how many requests went out.
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    pub response_body: String,
    /// Error message to return (if set)
    pub error_message: Option<String>,
    /// Number of post_json calls observed
    calls: AtomicUsize,
}

impl FakeTransport {
    /// Create fake transport with given response
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            error_message: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            response_body: String::new(),
            error_message: Some(msg.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests issued through this transport
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _body: &str,
    ) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = self.error_message {
            return Err(TransportError::Network(msg.clone()));
        }
        Ok(self.response_body.clone())
    }
}

/// Concrete transport enum
///
/// Wraps both transport types, avoiding dyn compatibility issues.
#[derive(Debug)]
pub enum Transport {
    Real(UreqTransport),
    Fake(FakeTransport),
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(UreqTransport::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_transport_basic() {
        let transport = FakeTransport::new("test response");
        let result = transport.post_json("http://test", &[], "{}");
        assert_eq!(result.unwrap(), "test response");
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("test error");
        let result = transport.post_json("http://test", &[], "{}");
        assert!(result.is_err());
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Network("test".to_string());
        assert_eq!(format!("{}", err), "Network error: test");

        let err = TransportError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(format!("{}", err), "HTTP error 404: not found");
    }
}
