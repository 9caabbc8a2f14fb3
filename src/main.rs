mod config;
mod db;
mod routes;
mod services;
mod site;
mod state;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use services::tmdb::{TmdbClient, TrendingSource, TrendingWindow};

#[derive(Parser, Debug)]
#[command(name = "movie-review", about = "AI Movie Review site, movies API, and TMDB ingestion")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the API and pages (default).
    Serve,
    /// Run one TMDB trending ingestion pass and print the summary.
    Ingest {
        /// Trending window; the standalone job follows the weekly feed.
        #[arg(long, default_value = "week")]
        window: TrendingWindow,
    },
    /// Run the periodic ingestion worker.
    Worker,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = config::AppConfig::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    // Non-fatal: ingestion is disabled if the token is missing.
    let tmdb: Option<Arc<dyn TrendingSource>> = match TmdbClient::from_env() {
        Ok(client) => {
            tracing::info!("TMDB client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "TMDB client not configured — ingestion disabled");
            None
        }
    };

    let site = site::api::ApiClient::new(config.site_api_base_url.clone()).expect("site API client build failed");
    let state = state::AppState::new(pool, tmdb, site);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(api_base = state.site.base_url(), "pages render from movies API");
            let app = routes::app(state);
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
                .await
                .expect("failed to bind");

            tracing::info!(port = config.port, "movie-review listening");
            axum::serve(listener, app).await.expect("server failed");
        }
        Command::Ingest { window } => {
            let source = state.tmdb.clone().expect("TMDB_API_KEY must be set for ingest");
            let summary = services::ingest::ingest_trending(&state.pool, source.as_ref(), window)
                .await
                .expect("ingest failed");
            println!("{}", serde_json::to_string(&summary).expect("summary serializes"));
        }
        Command::Worker => {
            let interval = Duration::from_secs(config.ingest_interval_secs);
            let worker = services::scheduler::spawn_ingest_scheduler(state, interval);
            worker.await.expect("ingest scheduler stopped");
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
