//! HTTP client for a real identification/care service.
//!
//! Selected with `AI_PROVIDER=http`. The wire format is plain JSON:
//! `POST /identify { photo_url }` and `POST /care { name,
//! scientific_name }`, each answering with the structured result.
//! Transport failures are classified into the typed taxonomy at this
//! boundary so nothing downstream ever inspects message text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use verdant_core::identify::{CareInstructions, Identification};

use crate::error::AiError;
use crate::provider::PlantIdentifier;
use crate::retry::with_timeout;

/// Default per-call deadline.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct IdentifyRequest<'a> {
    photo_url: &'a str,
}

#[derive(Debug, Serialize)]
struct CareRequest<'a> {
    name: &'a str,
    scientific_name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct IdentifyResponse {
    scientific_name: String,
    common_name: String,
    confidence: f32,
}

/// reqwest-backed implementation of [`PlantIdentifier`].
pub struct HttpIdentifier {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpIdentifier {
    /// Client for a service at `base_url` (e.g. `http://ai:8700`).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST a JSON body and decode a JSON response, classifying every
    /// failure into the typed taxonomy.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AiError>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let detail = response.text().await.unwrap_or_default();
            return Err(AiError::InvalidFile(detail));
        }
        if !status.is_success() {
            return Err(AiError::Api(format!("Service answered {status}")));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| AiError::Unknown(format!("Malformed service response: {e}")))
    }
}

/// Map a reqwest transport error onto the taxonomy.
fn classify_transport_error(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout("The request took too long".to_string())
    } else if err.is_connect() || err.is_request() {
        AiError::Network(err.to_string())
    } else {
        AiError::Unknown(err.to_string())
    }
}

#[async_trait]
impl PlantIdentifier for HttpIdentifier {
    async fn identify(
        &self,
        photo_url: &str,
        cancel: &CancellationToken,
    ) -> Result<Identification, AiError> {
        let response: IdentifyResponse = with_timeout(
            self.post_json("/identify", &IdentifyRequest { photo_url }),
            self.timeout,
            cancel,
        )
        .await?;

        Ok(Identification {
            scientific_name: response.scientific_name,
            common_name: response.common_name,
            confidence: response.confidence,
        })
    }

    async fn generate_care(
        &self,
        name: &str,
        scientific_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<CareInstructions, AiError> {
        with_timeout(
            self.post_json(
                "/care",
                &CareRequest {
                    name,
                    scientific_name,
                },
            ),
            self.timeout,
            cancel,
        )
        .await
    }
}
