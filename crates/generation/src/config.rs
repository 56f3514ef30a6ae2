//! Connection and polling settings for the generation API.

use std::time::Duration;

use pairblend_core::config::{env_or, parse_or, require, ConfigError};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.wavespeed.ai/api/v3";

/// Default image-edit model path, appended to the base URL for submissions.
pub const DEFAULT_MODEL_PATH: &str = "bytedance/seedream-v4/edit";

/// Upper bound on a single HTTP exchange with the API.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Prompt sent with every submission.
pub const DEFAULT_PROMPT: &str = "Blend the two people in the reference photos into a single \
    realistic portrait of one person who clearly shares facial features of both. \
    Keep a neutral studio background, natural lighting, and a friendly expression.";

/// Settings for talking to the generation API.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.wavespeed.ai/api/v3`.
    pub api_url: String,
    /// Model route used for submissions, e.g. `bytedance/seedream-v4/edit`.
    pub model_path: String,
    /// Prompt template sent with every job.
    pub prompt: String,
    /// Deadline for each submit or status request, connect included.
    pub request_timeout: Duration,
}

impl GenerationConfig {
    /// Build a config with the default URL, model and prompt.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                           | Default                           |
    /// |-----------------------------------|-----------------------------------|
    /// | `GENERATION_API_KEY`              | required                          |
    /// | `GENERATION_API_URL`              | `https://api.wavespeed.ai/api/v3` |
    /// | `GENERATION_MODEL_PATH`           | `bytedance/seedream-v4/edit`      |
    /// | `GENERATION_PROMPT`               | built-in blend prompt             |
    /// | `GENERATION_REQUEST_TIMEOUT_SECS` | `30`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_or(
            "GENERATION_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "GENERATION_REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_key: require("GENERATION_API_KEY")?,
            api_url: env_or("GENERATION_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            model_path: env_or("GENERATION_MODEL_PATH", DEFAULT_MODEL_PATH)
                .trim_matches('/')
                .to_string(),
            prompt: env_or("GENERATION_PROMPT", DEFAULT_PROMPT),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Full URL of the submission endpoint.
    pub fn submit_url(&self) -> String {
        format!("{}/{}", self.api_url, self.model_path)
    }

    /// Full URL of the result endpoint for one job.
    pub fn result_url(&self, job_id: &str) -> String {
        format!("{}/predictions/{}/result", self.api_url, job_id)
    }
}

/// Bounds for waiting on a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Status checks before giving up.
    pub max_attempts: u32,
    /// Sleep before each status check.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(2),
        }
    }
}

impl PollConfig {
    /// Load polling bounds from `POLL_MAX_ATTEMPTS` and `POLL_INTERVAL_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_attempts = parse_or("POLL_MAX_ATTEMPTS", defaults.max_attempts)?;
        let interval_ms = parse_or("POLL_INTERVAL_MS", defaults.interval.as_millis() as u64)?;

        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "POLL_MAX_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            max_attempts,
            interval: Duration::from_millis(interval_ms),
        })
    }

    /// Worst-case time spent waiting on one job.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}
