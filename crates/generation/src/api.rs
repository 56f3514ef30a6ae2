//! REST client for the generation API.
//!
//! Wraps job submission and result retrieval using [`reqwest`]. The API is
//! asynchronous: a submission only returns a job id, and the finished image
//! is picked up later through [`GenerationApi::await_result`].

use std::time::Duration;

use crate::config::{GenerationConfig, PollConfig};
use crate::poll::poll_until_done;
use crate::types::{Envelope, Prediction, SubmitRequest};

/// Longest response body kept in an error, in bytes.
const MAX_ERROR_BODY: usize = 1024;

/// Cap on establishing a connection, below the overall request deadline.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the generation API.
pub struct GenerationApi {
    client: reqwest::Client,
    config: GenerationConfig,
}

/// Errors from the generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The envelope carried a non-200 `code`.
    #[error("Generation API rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The body was not the JSON shape we expect.
    #[error("Malformed response ({reason}): {body}")]
    MalformedResponse { reason: String, body: String },

    /// A submission was acknowledged without a job id.
    #[error("Submission response has no job id: {body}")]
    MissingJobId { body: String },

    /// The job reached the `failed` state.
    #[error("Job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },

    /// The job completed without any output URL.
    #[error("Job {job_id} completed without outputs")]
    NoOutputs { job_id: String },

    /// The job did not finish within the polling budget.
    #[error("Job {job_id} not finished after {attempts} attempts")]
    TimedOut { job_id: String, attempts: u32 },
}

impl GenerationApi {
    /// Create a new API client whose requests give up after
    /// `config.request_timeout`.
    ///
    /// A status request that never answers then counts as one failed poll
    /// attempt instead of stalling the job forever.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    ///
    /// The caller owns the client's timeouts.
    pub fn with_client(client: reqwest::Client, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Submit one blend job for two reference images.
    ///
    /// Sends `POST {api_url}/{model_path}` with the configured prompt and
    /// `enable_sync_mode: false`. Returns the job id from the
    /// acknowledgement; the image itself is fetched by polling.
    pub async fn submit(&self, image_a: &str, image_b: &str) -> Result<String, GenerationError> {
        let body = SubmitRequest {
            prompt: &self.config.prompt,
            images: [image_a, image_b],
            enable_sync_mode: false,
        };

        let response = self
            .client
            .post(self.config.submit_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let (prediction, raw) = Self::parse_response(response).await?;

        match prediction.id {
            Some(id) if !id.is_empty() => {
                tracing::debug!(job_id = %id, status = ?prediction.status, "Generation job accepted");
                Ok(id)
            }
            _ => Err(GenerationError::MissingJobId { body: raw }),
        }
    }

    /// Fetch the current state of a job.
    ///
    /// Sends `GET {api_url}/predictions/{job_id}/result`.
    pub async fn fetch_result(&self, job_id: &str) -> Result<Prediction, GenerationError> {
        let response = self
            .client
            .get(self.config.result_url(job_id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let (prediction, _raw) = Self::parse_response(response).await?;
        Ok(prediction)
    }

    /// Poll a job until it completes, fails, or the budget runs out.
    ///
    /// Returns the first output URL of a completed job.
    pub async fn await_result(
        &self,
        job_id: &str,
        poll: &PollConfig,
    ) -> Result<String, GenerationError> {
        poll_until_done(job_id, poll, || self.fetch_result(job_id)).await
    }

    // ---- private helpers ----

    /// Check status and envelope code, then decode the `data` payload.
    ///
    /// The raw body is returned alongside so callers can attach it to
    /// their own errors.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<(Prediction, String), GenerationError> {
        let status = response.status();
        let raw = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: truncate(raw),
            });
        }

        let envelope: Envelope<Prediction> =
            serde_json::from_str(&raw).map_err(|e| GenerationError::MalformedResponse {
                reason: e.to_string(),
                body: truncate(raw.clone()),
            })?;

        if envelope.code != 200 {
            return Err(GenerationError::Rejected {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }

        match envelope.data {
            Some(data) => Ok((data, truncate(raw))),
            None => Err(GenerationError::MalformedResponse {
                reason: "missing data".to_string(),
                body: truncate(raw),
            }),
        }
    }
}

/// Cap a body at [`MAX_ERROR_BODY`] bytes on a char boundary.
fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
