//! Database initialization and migration runner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every entry point (server, one-shot ingest, worker) creates the shared SQLx
//! pool here so the `movies` schema is migrated before any query runs.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Pool size from `DB_MAX_CONNECTIONS`; never below one connection.
fn db_max_connections() -> u32 {
    crate::config::env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = db_max_connections();
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    let migrator = sqlx::migrate!("src/db/migrations");
    migrator.run(&pool).await?;
    tracing::info!(max_connections, migrations = migrator.iter().count(), "movies schema ready");

    Ok(pool)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
