//! The two collaborators of a combination run.
//!
//! [`CombinationStore`] is the record store holding people and the
//! combination ledger; [`ImageGenerator`] is the remote blend service.
//! Production wires them to Postgres and the generation API; tests swap in
//! in-memory fakes.

use std::collections::HashSet;

use async_trait::async_trait;
use pairblend_db::models::combination::{CreateCombination, InsertOutcome};
use pairblend_db::models::person::Person;
use pairblend_db::repositories::{CombinationRepo, PersonRepo};
use pairblend_db::DbPool;
use pairblend_generation::{GenerationApi, GenerationError, PollConfig};

/// Durable storage for people and generated combinations.
#[async_trait]
pub trait CombinationStore: Send + Sync {
    /// Every registered person.
    async fn list_people(&self) -> Result<Vec<Person>, sqlx::Error>;

    /// Labels that already have a combination.
    async fn list_combination_names(&self) -> Result<HashSet<String>, sqlx::Error>;

    /// Insert-if-absent keyed by label.
    async fn insert_combination(
        &self,
        input: &CreateCombination,
    ) -> Result<InsertOutcome, sqlx::Error>;
}

/// Asynchronous image blending service.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Start a blend of two images, returning the job id.
    async fn submit(&self, image_a: &str, image_b: &str) -> Result<String, GenerationError>;

    /// Wait for a job to finish, returning the output image URL.
    async fn await_result(&self, job_id: &str, poll: &PollConfig)
        -> Result<String, GenerationError>;
}

/// [`CombinationStore`] backed by the Postgres repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CombinationStore for PgStore {
    async fn list_people(&self) -> Result<Vec<Person>, sqlx::Error> {
        PersonRepo::list(&self.pool).await
    }

    async fn list_combination_names(&self) -> Result<HashSet<String>, sqlx::Error> {
        CombinationRepo::list_names(&self.pool).await
    }

    async fn insert_combination(
        &self,
        input: &CreateCombination,
    ) -> Result<InsertOutcome, sqlx::Error> {
        CombinationRepo::insert(&self.pool, input).await
    }
}

#[async_trait]
impl ImageGenerator for GenerationApi {
    async fn submit(&self, image_a: &str, image_b: &str) -> Result<String, GenerationError> {
        GenerationApi::submit(self, image_a, image_b).await
    }

    async fn await_result(
        &self,
        job_id: &str,
        poll: &PollConfig,
    ) -> Result<String, GenerationError> {
        GenerationApi::await_result(self, job_id, poll).await
    }
}
