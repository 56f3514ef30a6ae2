//! One-shot combination run for cron-style schedulers.
//!
//! Runs a single pass and prints the summary as JSON on stdout. Exits
//! non-zero only when configuration is missing or the store cannot be read.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pairblend_worker=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // --- Database ---
    let Some(database_url) = pairblend_core::config::env_var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };
    let pool = match pairblend_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    // --- Worker ---
    let worker = match pairblend_worker::build_from_env(pool) {
        Ok(worker) => worker,
        Err(e) => {
            tracing::error!(error = %e, "Worker is not configured");
            return ExitCode::FAILURE;
        }
    };

    match worker.run().await {
        Ok(summary) => {
            match serde_json::to_string(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "Failed to encode summary"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Combination run failed");
            ExitCode::FAILURE
        }
    }
}
