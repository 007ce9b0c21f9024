//! Shared helpers for integration tests.
//!
//! Every test gets a fresh database from `#[sqlx::test]` with the migrations
//! applied and `fixtures/base.sql` loaded (two departments, two users, three
//! catalog components).

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use equipos_server::{
    api, config::AppConfig, models::EquipmentStatus, repository::Repository, services::Services,
    AppState,
};

/// Build the services container on top of the test pool.
pub fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool))
}

/// Build the full application router, as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services(pool)),
    };
    api::create_router(state)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn put(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PUT, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert an equipment row directly, bypassing the API.
pub async fn insert_equipment(pool: &PgPool) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO equipo (usuario_id, departamento_id) VALUES (1, 1) RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn equipment_status(pool: &PgPool, id: i32) -> EquipmentStatus {
    sqlx::query_scalar("SELECT estado FROM equipo WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
