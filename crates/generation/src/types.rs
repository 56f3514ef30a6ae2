//! Wire types for the generation API.
//!
//! Both endpoints wrap their payload as `{ "code": ..., "message": ...,
//! "data": { ... } }`. The submission acknowledgement and the result share
//! the same `data` shape; only the result carries `outputs` and `error`.

use serde::{Deserialize, Serialize};

/// Body of a job submission.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub prompt: &'a str,
    pub images: [&'a str; 2],
    /// Always `false`: we want an acknowledgement, not the finished image.
    pub enable_sync_mode: bool,
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Remote state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Created,
    Queued,
    Processing,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A job as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub outputs: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Prediction {
    /// First output URL, if the job produced any.
    pub fn first_output(&self) -> Option<&str> {
        self.outputs
            .as_deref()
            .and_then(|outputs| outputs.iter().find(|url| !url.is_empty()))
            .map(String::as_str)
    }

    /// Remote error message, ignoring the empty string the API sends on success.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|msg| !msg.is_empty())
    }
}
