use super::{HttpResponse, Transport, TransportError};
use serde_json::Value;
use std::time::Duration;

/// [`Transport`] backed by a shared `reqwest` client with a request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Setup(err.to_string()))?;
        Ok(Self { client })
    }

    async fn read(
        url: &str,
        response: reqwest::Result<reqwest::Response>,
    ) -> Result<HttpResponse, TransportError> {
        let response = response.map_err(|err| request_error(url, err))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| request_error(url, err))?;
        Ok(HttpResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self))]
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await;
        Self::read(url, response).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let response = self.client.post(url).json(body).send().await;
        Self::read(url, response).await
    }
}

fn request_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
