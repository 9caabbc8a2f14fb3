//! Worker scheduler — periodic TMDB ingestion with a heartbeat.
//!
//! ERROR HANDLING
//! ==============
//! A failed pass is logged and the loop waits for the next tick. Without a
//! configured TMDB source the worker still emits heartbeats.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::services::ingest::{self, IngestSummary};
use crate::services::tmdb::TrendingWindow;
use crate::state::AppState;

/// Spawn the ingestion loop. The first pass runs immediately.
pub fn spawn_ingest_scheduler(state: AppState, interval: Duration) -> JoinHandle<()> {
    info!(interval_secs = interval.as_secs(), "ingest scheduler configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            run_cycle(&state).await;
        }
    })
}

pub(crate) async fn run_cycle(state: &AppState) -> Option<IngestSummary> {
    info!("worker heartbeat");

    let Some(source) = &state.tmdb else {
        warn!("TMDB not configured; skipping ingest");
        return None;
    };

    match ingest::ingest_trending(&state.pool, source.as_ref(), TrendingWindow::Week).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            error!(error = %e, "scheduled ingest failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
