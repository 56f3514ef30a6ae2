//! Worker settings loaded from the environment.

use pairblend_core::config::{parse_or, ConfigError};
use pairblend_generation::PollConfig;

/// Settings for one combination run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerConfig {
    /// Bounds for waiting on each generation job.
    pub poll: PollConfig,
    /// Cap on concurrent submissions and polls. `None` fans out one task
    /// per pair.
    pub max_in_flight: Option<usize>,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Default          |
    /// |---------------------|------------------|
    /// | `POLL_MAX_ATTEMPTS` | `60`             |
    /// | `POLL_INTERVAL_MS`  | `2000`           |
    /// | `MAX_IN_FLIGHT`     | `0` (unbounded)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_in_flight: usize = parse_or("MAX_IN_FLIGHT", 0)?;

        Ok(Self {
            poll: PollConfig::from_env()?,
            max_in_flight: (max_in_flight > 0).then_some(max_in_flight),
        })
    }
}
