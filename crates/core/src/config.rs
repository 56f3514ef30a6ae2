//! Environment variable helpers shared by every `from_env` constructor.
//!
//! Values are read after `dotenvy::dotenv()` has populated the process
//! environment. Empty values count as unset.

use std::str::FromStr;

/// A required variable is missing, a value does not parse, or a client
/// built from the values cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    /// The HTTP client for an external service could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Read a variable, treating empty or whitespace-only values as unset.
pub fn env_var(var: &'static str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable that has no sensible default.
pub fn require(var: &'static str) -> Result<String, ConfigError> {
    env_var(var).ok_or(ConfigError::Missing(var))
}

/// Read a variable, falling back to `default` when unset.
pub fn env_or(var: &'static str, default: &str) -> String {
    env_var(var).unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable, falling back to `default` when unset.
pub fn parse_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env_var(var) {
        Some(value) => parse_value(var, &value),
        None => Ok(default),
    }
}

/// Parse a raw value for `var`, reporting the variable name on failure.
pub fn parse_value<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
