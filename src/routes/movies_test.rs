use super::*;

fn params(limit: Option<i64>, offset: Option<i64>, id: Option<i32>) -> ListMoviesParams {
    ListMoviesParams { limit, offset, id }
}

#[test]
fn validate_params_applies_defaults() {
    let query = validate_params(&ListMoviesParams::default()).unwrap();
    assert_eq!(query, MovieListQuery { limit: DEFAULT_LIST_LIMIT, offset: 0, id: None });
}

#[test]
fn validate_params_accepts_detail_lookup() {
    let query = validate_params(&params(Some(1), Some(0), Some(42))).unwrap();
    assert_eq!(query, MovieListQuery { limit: 1, offset: 0, id: Some(42) });
}

#[test]
fn validate_params_allows_max_limit() {
    assert!(validate_params(&params(Some(MAX_LIST_LIMIT), None, None)).is_ok());
}

#[test]
fn validate_params_rejects_limit_over_max() {
    let err = validate_params(&params(Some(MAX_LIST_LIMIT + 1), None, None)).unwrap_err();
    assert_eq!(err, StatusCode::BAD_REQUEST);
}

#[test]
fn validate_params_rejects_negative_values() {
    assert_eq!(validate_params(&params(Some(-1), None, None)), Err(StatusCode::BAD_REQUEST));
    assert_eq!(validate_params(&params(None, Some(-5), None)), Err(StatusCode::BAD_REQUEST));
}

#[test]
fn movie_error_to_status_maps_database() {
    let err = MovieError::Database(sqlx::Error::RowNotFound);
    assert_eq!(movie_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}
