//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pairblend_api::config::ServerConfig;
use pairblend_api::router::build_app_router;
use pairblend_api::state::AppState;
use pairblend_core::config::ConfigError;
use pairblend_generation::{GenerationError, PollConfig};
use pairblend_worker::{CombinationWorker, ImageGenerator, PgStore, WorkerConfig};
use sqlx::PgPool;
use tower::ServiceExt;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sweep_interval_secs: 0,
    }
}

/// Generator that finishes every job immediately with a predictable URL.
#[derive(Default)]
pub struct InstantGenerator {
    pub submits: AtomicUsize,
}

impl InstantGenerator {
    pub fn output_for(job_id: &str) -> String {
        format!("https://out/{job_id}.png")
    }
}

#[async_trait]
impl ImageGenerator for InstantGenerator {
    async fn submit(&self, _image_a: &str, _image_b: &str) -> Result<String, GenerationError> {
        let n = self.submits.fetch_add(1, Ordering::SeqCst);
        Ok(format!("job-{n}"))
    }

    async fn await_result(
        &self,
        job_id: &str,
        _poll: &PollConfig,
    ) -> Result<String, GenerationError> {
        Ok(Self::output_for(job_id))
    }
}

/// App whose worker writes to `pool` and generates through `generator`.
pub fn build_test_app(pool: PgPool, generator: Arc<InstantGenerator>) -> Router {
    let config = WorkerConfig {
        poll: PollConfig {
            max_attempts: 3,
            interval: Duration::from_millis(1),
        },
        max_in_flight: None,
    };
    let worker = CombinationWorker::new(Arc::new(PgStore::new(pool.clone())), generator, config);
    app_with_worker(pool, Ok(Arc::new(worker)))
}

/// App started without a generation API key.
pub fn build_unconfigured_app(pool: PgPool) -> Router {
    app_with_worker(pool, Err(ConfigError::Missing("GENERATION_API_KEY")))
}

fn app_with_worker(
    pool: PgPool,
    worker: Result<Arc<CombinationWorker>, ConfigError>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        worker,
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    app.oneshot(Request::post(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait for a background run to leave `expected` combinations in the ledger.
pub async fn wait_for_combinations(pool: &PgPool, expected: usize) -> usize {
    let mut count = 0;
    for _ in 0..200 {
        count = pairblend_db::repositories::CombinationRepo::list(pool)
            .await
            .unwrap()
            .len();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    count
}
