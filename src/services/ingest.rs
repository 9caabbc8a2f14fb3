//! Ingestion service — one pass of TMDB trending into `movies`.
//!
//! DESIGN
//! ======
//! Fetch, normalize, then upsert in a single transaction. Items TMDB returns
//! without an integer id are counted as skipped rather than failing the pass.

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::services::movie::{self, MovieError};
use crate::services::tmdb::{NormalizedMovie, TmdbError, TrendingSource, TrendingWindow, normalize_movie};

/// Upper bound on trending items stored per pass.
pub const MAX_INGEST_ITEMS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Tmdb(#[from] TmdbError),
    #[error(transparent)]
    Movie(#[from] MovieError),
}

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Items TMDB returned, before the per-pass cap.
    pub total: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Normalize at most [`MAX_INGEST_ITEMS`] raw items. Returns the batch and
/// the number of capped items that could not be normalized.
#[must_use]
pub fn prepare_batch(items: &[Value]) -> (Vec<NormalizedMovie>, usize) {
    let capped = &items[..items.len().min(MAX_INGEST_ITEMS)];
    let batch = capped.iter().filter_map(normalize_movie).collect::<Vec<_>>();
    let skipped = capped.len() - batch.len();
    (batch, skipped)
}

/// Run one ingestion pass.
///
/// # Errors
///
/// Returns an error if the trending fetch fails or the upsert transaction fails.
pub async fn ingest_trending(
    pool: &PgPool,
    source: &dyn TrendingSource,
    window: TrendingWindow,
) -> Result<IngestSummary, IngestError> {
    let items = source.fetch_trending(window).await?;
    let (batch, skipped) = prepare_batch(&items);
    let counts = movie::upsert_movies(pool, &batch).await?;

    let summary = IngestSummary { total: items.len(), inserted: counts.inserted, updated: counts.updated, skipped };
    info!(
        window = window.as_str(),
        total = summary.total,
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        "tmdb trending ingested"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
