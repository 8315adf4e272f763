//! REST surface. Handlers are thin: decode, call into `products_hr`, encode.

mod departments;
mod employees;
mod jobs;
mod users;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(employees::router())
        .merge(departments::router())
        .merge(jobs::router())
        .merge(users::router())
}

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "API is running",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = platform_db::ping(&state.db).await;
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}
