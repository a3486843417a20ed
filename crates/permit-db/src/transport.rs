//! The HTTP hop to the remote data service.

use reqwest::Client;
use tracing::debug;

use crate::config::DataServiceConfig;
use crate::error::DataError;
use crate::payload::{Payload, Target};

/// Status and raw body of one exchange, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_throttled(&self) -> bool {
        self.status == 429
    }
}

/// Sends one payload and returns whatever came back. Implementations do
/// not retry and do not interpret status codes; a missing response is the
/// only error.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        target: Target,
        payload: &Payload,
    ) -> impl Future<Output = Result<RawResponse, DataError>> + Send;
}

/// `reqwest`-backed transport that attaches the API key.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &DataServiceConfig) -> Result<Self, DataError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DataError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, target: Target, payload: &Payload) -> Result<RawResponse, DataError> {
        let url = format!("{}{}", self.base_url, target.path());
        debug!(%url, operation = payload.label(), "Calling data service");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
