//! Bounded polling of a single generation job.
//!
//! Each check is preceded by a sleep of [`PollConfig::interval`]. Queued or
//! processing jobs and failed status requests are retried quietly; only a
//! terminal state or running out of attempts ends the loop.

use std::future::Future;

use crate::api::GenerationError;
use crate::config::PollConfig;
use crate::types::{JobStatus, Prediction};

/// Poll `fetch` until the job reaches a terminal state.
///
/// Returns the first output URL of a completed job. A `failed` job, a
/// completed job without outputs, and an exhausted attempt budget are all
/// errors.
pub async fn poll_until_done<F, Fut>(
    job_id: &str,
    poll: &PollConfig,
    mut fetch: F,
) -> Result<String, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Prediction, GenerationError>>,
{
    for attempt in 1..=poll.max_attempts {
        tokio::time::sleep(poll.interval).await;

        let prediction = match fetch().await {
            Ok(prediction) => prediction,
            Err(e) => {
                tracing::debug!(job_id, attempt, error = %e, "Status check failed, retrying");
                continue;
            }
        };

        match prediction.status {
            JobStatus::Completed => {
                return match prediction.first_output() {
                    Some(url) => {
                        tracing::debug!(job_id, attempt, output = %url, "Job completed");
                        Ok(url.to_string())
                    }
                    None => Err(GenerationError::NoOutputs {
                        job_id: job_id.to_string(),
                    }),
                };
            }
            JobStatus::Failed => {
                let message = prediction
                    .error_message()
                    .unwrap_or("no error message")
                    .to_string();
                return Err(GenerationError::JobFailed {
                    job_id: job_id.to_string(),
                    message,
                });
            }
            status => {
                tracing::trace!(job_id, attempt, ?status, "Job still running");
            }
        }
    }

    Err(GenerationError::TimedOut {
        job_id: job_id.to_string(),
        attempts: poll.max_attempts,
    })
}
