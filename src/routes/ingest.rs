//! Ingestion trigger route.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::services::ingest::{self, IngestError, IngestSummary};
use crate::services::tmdb::TrendingWindow;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IngestParams {
    #[serde(default)]
    pub window: TrendingWindow,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ok: bool,
    /// Items TMDB returned.
    pub count: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl From<IngestSummary> for IngestResponse {
    fn from(summary: IngestSummary) -> Self {
        Self {
            ok: true,
            count: summary.total,
            inserted: summary.inserted,
            updated: summary.updated,
            skipped: summary.skipped,
        }
    }
}

/// `POST /api/ingest/tmdb/trending?window=day|week` — run one ingestion pass.
pub async fn ingest_trending(State(state): State<AppState>, Query(params): Query<IngestParams>) -> Response {
    let Some(source) = &state.tmdb else {
        warn!("ingest requested but TMDB is not configured");
        return error_body("TMDB token missing/invalid in environment".to_owned());
    };

    match ingest::ingest_trending(&state.pool, source.as_ref(), params.window).await {
        Ok(summary) => Json(IngestResponse::from(summary)).into_response(),
        Err(e) => {
            error!(error = %e, window = params.window.as_str(), "ingest failed");
            error_body(ingest_error_message(&e))
        }
    }
}

fn ingest_error_message(err: &IngestError) -> String {
    match err {
        IngestError::Tmdb(e) => e.to_string(),
        IngestError::Movie(_) => "database error during ingest".to_owned(),
    }
}

fn error_body(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
