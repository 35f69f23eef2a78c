//! Request/response transport over HTTP.
//!
//! Each message pattern maps to `POST {base_url}/{subject}` with the JSON
//! payload as the body. The timeout lives on the client, so a slow Product
//! service surfaces as a transport error rather than a hung task.

use std::time::Duration;

use async_trait::async_trait;

use crate::rpc::{RequestTransport, TransportError};

/// HTTP-backed [`RequestTransport`].
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport against the given base URL with a per-request
    /// timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RequestTransport for HttpTransport {
    async fn request(
        &self,
        subject: &str,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        let url = format!("{}/{subject}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| TransportError(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}
