//! HTTP access to the remote task store.
//!
//! The [`Transport`] trait is the seam between the sync layer and the network: it only
//! moves bytes and reports failures that happen before a body is obtained. A concrete
//! implementation on top of `reqwest` lives in the `reqwest_client` submodule.

#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use thiserror::Error;

pub mod reqwest_client;

pub use reqwest_client::ReqwestTransport;

/// Failures before a response body could be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },
    /// The connection failed or the body could not be read
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
    /// The server answered with a non-success status and no usable explanation
    #[error("Server answered with HTTP {status}")]
    Status { status: u16 },
    #[error("Cannot build HTTP client: {0}")]
    Setup(String),
}

/// Status and raw text of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, automock)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(400, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
