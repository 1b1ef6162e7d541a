//! HTTP transport for the Gemini `generateContent` endpoint.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::Client;

use crate::config::{ApiConfig, CredentialStatus, SecureString};

use super::error::InferenceError;
use super::request::GenerateContentRequest;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// One physical request/response exchange with the inference provider.
///
/// Implementations return the raw body on a 2xx status. Connection failures
/// map to [`InferenceError::Transport`] and other statuses to
/// [`InferenceError::UpstreamStatus`].
pub trait InferenceTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<String, InferenceError>> + Send;
}

/// Client for the Gemini API.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: SecureString,
}

impl GeminiClient {
    /// Create a new client from config.
    ///
    /// Fails with `NotConfigured` if no API key can be resolved.
    pub fn new(config: &ApiConfig) -> Result<Self, InferenceError> {
        let api_key = match config.resolve_credential() {
            CredentialStatus::Configured(key) => key,
            CredentialStatus::Unconfigured { reason } => {
                return Err(InferenceError::NotConfigured { reason });
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint_url(&config.base_url, &config.model),
            api_key,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl InferenceTransport for GeminiClient {
    async fn send(&self, request: &GenerateContentRequest) -> Result<String, InferenceError> {
        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            tracing::debug!(
                status = %status,
                latency_ms,
                error = %error_text,
                "Inference API returned an error status"
            );

            return Err(InferenceError::UpstreamStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| InferenceError::Transport {
            message: format!("Failed to read response body: {}", e),
        })?;

        tracing::debug!(
            status = %status,
            latency_ms,
            body_len = body.len(),
            "Inference API responded"
        );

        Ok(body)
    }
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}
