//! Movie listing route.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::error;

use crate::services::movie::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, MovieError, MovieListQuery, MovieRow};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub id: Option<i32>,
}

/// `GET /api/movies?limit&offset&id` — movies by descending popularity.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<Vec<MovieRow>>, StatusCode> {
    let query = validate_params(&params)?;
    let rows = movie::list_movies(&state.pool, query)
        .await
        .map_err(movie_error_to_status)?;
    Ok(Json(rows))
}

pub(crate) fn validate_params(params: &ListMoviesParams) -> Result<MovieListQuery, StatusCode> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let offset = params.offset.unwrap_or(0);
    if !(0..=MAX_LIST_LIMIT).contains(&limit) || offset < 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(MovieListQuery { limit, offset, id: params.id })
}

pub(crate) fn movie_error_to_status(err: MovieError) -> StatusCode {
    match err {
        MovieError::Database(e) => {
            error!(error = %e, "movie query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "movies_test.rs"]
mod tests;
