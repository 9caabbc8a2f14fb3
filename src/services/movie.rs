//! Movie service — listing and upserting rows in `movies`.
//!
//! DESIGN
//! ======
//! Listing is tolerant of partially ingested rows: missing popularity and
//! vote columns are coalesced to zero so every row serializes with the same
//! shape. Upserts key on `tmdb_id` and run in a single transaction.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::services::tmdb::NormalizedMovie;

pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MovieError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Movie as served by `GET /api/movies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieRow {
    pub id: i32,
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub language: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i32,
}

/// Validated listing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieListQuery {
    pub limit: i64,
    pub offset: i64,
    /// Restrict the listing to one movie.
    pub id: Option<i32>,
}

impl Default for MovieListQuery {
    fn default() -> Self {
        Self { limit: DEFAULT_LIST_LIMIT, offset: 0, id: None }
    }
}

/// Insert/update split of one upsert batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertCounts {
    pub inserted: usize,
    pub updated: usize,
}

// =============================================================================
// QUERIES
// =============================================================================

/// List movies by descending popularity.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_movies(pool: &PgPool, query: MovieListQuery) -> Result<Vec<MovieRow>, MovieError> {
    let rows = sqlx::query_as::<_, MovieRow>(
        "SELECT id, tmdb_id, title, original_title, language, overview,
                to_char(release_date, 'YYYY-MM-DD') AS release_date,
                poster_path, backdrop_path,
                COALESCE(popularity, 0)::float8 AS popularity,
                COALESCE(vote_average, 0)::float8 AS vote_average,
                COALESCE(vote_count, 0)::int4 AS vote_count
         FROM movies
         WHERE ($3::int4 IS NULL OR id = $3)
         ORDER BY COALESCE(popularity, 0) DESC, id ASC
         LIMIT $1 OFFSET $2",
    )
    .bind(query.limit)
    .bind(query.offset)
    .bind(query.id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or update movies keyed by `tmdb_id`.
///
/// # Errors
///
/// Returns a database error if any statement fails; the whole batch is rolled back.
pub async fn upsert_movies(pool: &PgPool, movies: &[NormalizedMovie]) -> Result<UpsertCounts, MovieError> {
    let mut counts = UpsertCounts::default();
    if movies.is_empty() {
        return Ok(counts);
    }

    let mut tx = pool.begin().await?;
    for movie in movies {
        // xmax is zero only for rows created by this statement.
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO movies (tmdb_id, title, original_title, language, overview, release_date,
                                 poster_path, backdrop_path, popularity, vote_average, vote_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT (tmdb_id) DO UPDATE SET
                 title = EXCLUDED.title,
                 original_title = EXCLUDED.original_title,
                 language = EXCLUDED.language,
                 overview = EXCLUDED.overview,
                 release_date = EXCLUDED.release_date,
                 poster_path = EXCLUDED.poster_path,
                 backdrop_path = EXCLUDED.backdrop_path,
                 popularity = EXCLUDED.popularity,
                 vote_average = EXCLUDED.vote_average,
                 vote_count = EXCLUDED.vote_count
             RETURNING (xmax = 0)",
        )
        .bind(movie.tmdb_id)
        .bind(&movie.title)
        .bind(&movie.original_title)
        .bind(&movie.language)
        .bind(&movie.overview)
        .bind(movie.release_date)
        .bind(&movie.poster_path)
        .bind(&movie.backdrop_path)
        .bind(movie.popularity)
        .bind(movie.vote_average)
        .bind(movie.vote_count)
        .fetch_one(tx.as_mut())
        .await?;

        if inserted {
            counts.inserted += 1;
        } else {
            counts.updated += 1;
        }
    }
    tx.commit().await?;

    Ok(counts)
}

#[cfg(test)]
#[path = "movie_test.rs"]
mod tests;
