//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves both the JSON API under `/api` and the
//! server-rendered pages at `/` and `/movies/{id}`.

pub mod ingest;
pub mod movies;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::site::pages;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api";

/// JSON API routes, mounted under [`API_PREFIX`].
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/movies", get(movies::list_movies))
        .route("/ingest/tmdb/trending", post(ingest::ingest_trending))
}

/// Full application router: API, pages, and liveness probe.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::home))
        .route("/movies/{id}", get(pages::movie_detail))
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api_routes())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /api/health`
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
