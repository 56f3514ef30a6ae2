mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_unconfigured_app, get, InstantGenerator};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok(pool: PgPool) {
    let app = build_test_app(pool, Arc::new(InstantGenerator::default()));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["worker_configured"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_is_degraded_without_worker(pool: PgPool) {
    let app = build_unconfigured_app(pool);

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["worker_configured"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_id_is_propagated(pool: PgPool) {
    let app = build_test_app(pool, Arc::new(InstantGenerator::default()));

    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn allowed_origin_gets_cors_headers(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = build_test_app(pool, Arc::new(InstantGenerator::default()));
    let response = app
        .oneshot(
            Request::get("/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}
