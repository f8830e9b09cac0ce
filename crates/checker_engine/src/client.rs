use std::time::Duration;

use checker_core::{AssessmentResult, SymptomQuery};
use checker_logging::{checker_debug, checker_warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{FailureKind, TransportError};

/// Fixed path of the symptom-check endpoint on the backend origin.
pub const SYMPTOM_CHECK_PATH: &str = "/api/symptom-check";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and port of the assessment service.
    pub backend_origin: String,
    /// `None` leaves connection setup unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the whole request unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_origin: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self) -> Result<Url, TransportError> {
        Url::parse(&self.backend_origin)
            .and_then(|origin| origin.join(SYMPTOM_CHECK_PATH))
            .map_err(|err| {
                TransportError::new(
                    FailureKind::InvalidEndpoint,
                    format!("invalid backend origin {:?}: {err}", self.backend_origin),
                )
            })
    }
}

#[async_trait::async_trait]
pub trait SymptomClient: Send + Sync {
    /// Issues exactly one request for `query`. No retries.
    async fn send(&self, query: &SymptomQuery) -> Result<AssessmentResult, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSymptomClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestSymptomClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let endpoint = settings.endpoint()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Internal, err.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SymptomClient for ReqwestSymptomClient {
    async fn send(&self, query: &SymptomQuery) -> Result<AssessmentResult, TransportError> {
        let body = serde_json::to_string(query)
            .map_err(|err| TransportError::new(FailureKind::Internal, err.to_string()))?;

        checker_debug!("POST {} body_len={}", self.endpoint, body.len());
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            checker_warn!("Symptom check rejected with status {}", status);
            return Err(TransportError::http_status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| TransportError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
