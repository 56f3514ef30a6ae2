//! Pairwise combination worker.
//!
//! Finds every pair of registered people without a blended portrait,
//! generates the missing ones through the generation API, and records them
//! in the append-only `generated` table. Safe to run from several triggers
//! at once.

pub mod combiner;
pub mod config;
pub mod schedule;
pub mod seams;

use std::sync::Arc;

use pairblend_core::config::ConfigError;
use pairblend_db::DbPool;
use pairblend_generation::{GenerationApi, GenerationConfig};

pub use combiner::{CombinationWorker, RunSummary, WorkerError};
pub use config::WorkerConfig;
pub use seams::{CombinationStore, ImageGenerator, PgStore};

/// Build a production worker from the environment.
///
/// Fails when the generation API key or a tuning value is missing or
/// invalid, or when the HTTP client cannot be built.
pub fn build_from_env(pool: DbPool) -> Result<CombinationWorker, ConfigError> {
    let generation = GenerationConfig::from_env()?;
    let config = WorkerConfig::from_env()?;
    let api = GenerationApi::new(generation)
        .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    Ok(CombinationWorker::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(api),
        config,
    ))
}
