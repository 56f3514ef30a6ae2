//! The combination worker.
//!
//! One [`CombinationWorker::run`] is a full pass over the ledger:
//!
//! 1. load people (fewer than two means nothing to do)
//! 2. load the labels that already have a combination
//! 3. resolve the missing pairs
//! 4. submit one generation job per missing pair, concurrently
//! 5. poll every submitted job, concurrently
//! 6. persist each finished image, treating a duplicate label as success
//! 7. summarize
//!
//! Each phase joins all of its tasks before the next one starts. Runs keep
//! no state between invocations and hold no locks, so overlapping runs are
//! safe: the worst case is two runs paying for the same pair, and the
//! unique label in the store keeps the ledger at one row per pair.

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pairblend_core::pairing::{missing_pairs, pair_count, MissingPair};
use pairblend_db::models::combination::{CreateCombination, InsertOutcome};
use pairblend_db::models::person::Person;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::WorkerConfig;
use crate::seams::{CombinationStore, ImageGenerator};

pub const MSG_NOT_ENOUGH_PEOPLE: &str = "Not enough people to combine";
pub const MSG_UP_TO_DATE: &str = "All combinations already generated";

/// Errors that abort a whole run. Per-pair failures never do.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Failed to load people: {0}")]
    LoadPeople(#[source] sqlx::Error),

    #[error("Failed to load generated combinations: {0}")]
    LoadLedger(#[source] sqlx::Error),
}

/// Outcome of one run, as returned by the trigger endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub message: String,
    /// Missing pairs found at the start of the run.
    pub total: usize,
    /// Pairs for which the API accepted a job.
    pub submitted: usize,
    /// Pairs whose image is now in the ledger (written by this run or a
    /// concurrent one).
    pub succeeded: usize,
    /// Pairs still missing after this run.
    pub failed: usize,
}

impl RunSummary {
    fn idle(message: &str) -> Self {
        Self {
            message: message.to_string(),
            total: 0,
            submitted: 0,
            succeeded: 0,
            failed: 0,
        }
    }

    fn finished(total: usize, submitted: usize, succeeded: usize) -> Self {
        Self {
            message: format!("Generated {succeeded} of {total} missing combinations"),
            total,
            submitted,
            succeeded,
            failed: total - succeeded,
        }
    }
}

/// A pair the API accepted a job for.
struct SubmittedJob {
    label: String,
    job_id: String,
}

/// A job that produced an image.
struct FinishedJob {
    label: String,
    image: String,
}

/// Generates a blended portrait for every pair of people that lacks one.
pub struct CombinationWorker {
    store: Arc<dyn CombinationStore>,
    generator: Arc<dyn ImageGenerator>,
    config: WorkerConfig,
}

impl CombinationWorker {
    pub fn new(
        store: Arc<dyn CombinationStore>,
        generator: Arc<dyn ImageGenerator>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            store,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Run one full pass. Only store read failures are errors.
    pub async fn run(&self) -> Result<RunSummary, WorkerError> {
        let people = self
            .store
            .list_people()
            .await
            .map_err(WorkerError::LoadPeople)?;

        if people.len() < 2 {
            tracing::info!(people = people.len(), "Not enough people to combine");
            return Ok(RunSummary::idle(MSG_NOT_ENOUGH_PEOPLE));
        }

        let done = self
            .store
            .list_combination_names()
            .await
            .map_err(WorkerError::LoadLedger)?;

        let missing = missing_pairs(&people, &done);
        if missing.is_empty() {
            tracing::info!(people = people.len(), done = done.len(), "All combinations up to date");
            return Ok(RunSummary::idle(MSG_UP_TO_DATE));
        }

        let total = missing.len();
        tracing::info!(
            people = people.len(),
            pairs = pair_count(people.len()),
            done = done.len(),
            missing = total,
            "Starting combination run",
        );

        // --- Submit ---
        let mut submissions = Vec::with_capacity(total);
        for pair in &missing {
            submissions.push(self.submit_pair(pair));
        }
        let submitted: Vec<SubmittedJob> = self
            .fan_out(submissions)
            .await
            .into_iter()
            .flatten()
            .collect();

        // --- Poll ---
        let mut polls = Vec::with_capacity(submitted.len());
        for job in &submitted {
            polls.push(self.await_job(job));
        }
        let finished: Vec<FinishedJob> = self
            .fan_out(polls)
            .await
            .into_iter()
            .flatten()
            .collect();

        // --- Persist ---
        let mut succeeded = 0;
        for job in &finished {
            if self.persist(job).await {
                succeeded += 1;
            }
        }

        let summary = RunSummary::finished(total, submitted.len(), succeeded);
        tracing::info!(
            total = summary.total,
            submitted = summary.submitted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Combination run finished",
        );
        Ok(summary)
    }

    /// Start a run in the background and log its outcome.
    ///
    /// The caller does not wait; a failed or truncated run leaves its pairs
    /// missing for the next trigger.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let worker = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = worker.run().await {
                tracing::error!(error = %e, "Background combination run failed");
            }
        })
    }

    // ---- phases ----

    async fn submit_pair(&self, pair: &MissingPair<'_, Person>) -> Option<SubmittedJob> {
        match self
            .generator
            .submit(&pair.left.image, &pair.right.image)
            .await
        {
            Ok(job_id) => {
                tracing::debug!(pair = %pair.label, job_id = %job_id, "Generation job submitted");
                Some(SubmittedJob {
                    label: pair.label.clone(),
                    job_id,
                })
            }
            Err(e) => {
                tracing::warn!(pair = %pair.label, error = %e, "Failed to submit generation job");
                None
            }
        }
    }

    async fn await_job(&self, job: &SubmittedJob) -> Option<FinishedJob> {
        match self
            .generator
            .await_result(&job.job_id, &self.config.poll)
            .await
        {
            Ok(image) => Some(FinishedJob {
                label: job.label.clone(),
                image,
            }),
            Err(e) => {
                tracing::warn!(
                    pair = %job.label,
                    job_id = %job.job_id,
                    error = %e,
                    "Generation job did not produce an image",
                );
                None
            }
        }
    }

    /// Returns `true` when the label is in the ledger afterwards.
    async fn persist(&self, job: &FinishedJob) -> bool {
        let input = CreateCombination {
            name: job.label.clone(),
            image: job.image.clone(),
        };

        match self.store.insert_combination(&input).await {
            Ok(InsertOutcome::Inserted(_)) => {
                tracing::info!(pair = %job.label, image = %job.image, "Combination saved");
                true
            }
            Ok(InsertOutcome::AlreadyExists) => {
                tracing::info!(pair = %job.label, "Combination already saved by another run");
                true
            }
            Err(e) => {
                tracing::error!(pair = %job.label, error = %e, "Failed to save combination");
                false
            }
        }
    }

    /// Await every future, in input order, honouring `max_in_flight`.
    async fn fan_out<F: Future>(&self, tasks: Vec<F>) -> Vec<F::Output> {
        match self.config.max_in_flight {
            Some(limit) => stream::iter(tasks).buffered(limit).collect().await,
            None => futures::future::join_all(tasks).await,
        }
    }
}
