use pairblend_core::config::{env_or, parse_or, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`). A trigger request
    /// waits for a whole combination run.
    pub request_timeout_secs: u64,
    /// Seconds between background sweeps; `0` disables the sweep (default: `300`).
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                      |
    /// | `SWEEP_INTERVAL_SECS`  | `300`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "http://localhost:5173"));

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 300)?,
            sweep_interval_secs: parse_or("SWEEP_INTERVAL_SECS", 300)?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
