//! Server-rendered pages: the home grid and the single-movie view.
//!
//! Each handler issues exactly one GET against the movies API and renders
//! the JSON it gets back with Leptos `view!` components. Records are
//! rendered as-is; only `id`, `title` and `release_date` are read,
//! everything else passes through.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::api::{self, ApiError};
use crate::state::AppState;

pub const HOME_LIMIT: u32 = 12;
const FALLBACK_TITLE: &str = "Movie";
const HOME_WIDTH: u32 = 960;
const DETAIL_WIDTH: u32 = 720;

/// Fields the home grid reads from a movie record.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieCard {
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` — grid of movie cards.
pub async fn home(State(state): State<AppState>) -> Response {
    match state
        .site
        .fetch_json::<Vec<MovieCard>>(&api::movies_list_path(HOME_LIMIT))
        .await
    {
        Ok(movies) => Html(render_home(movies)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /movies/:id` — one movie, shown as its raw record.
///
/// Ids outside the API's `i32` range get 400 before any request is made.
pub async fn movie_detail(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state
        .site
        .fetch_json::<Vec<Value>>(&api::movie_detail_path(id))
        .await
    {
        Ok(movies) => Html(render_movie(movies.first())).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &ApiError) -> Response {
    warn!(error = %err, "page API fetch failed");
    (StatusCode::BAD_GATEWAY, Html(render_error(err))).into_response()
}

// =============================================================================
// RENDERING
// =============================================================================

#[must_use]
pub fn render_home(movies: Vec<MovieCard>) -> String {
    render_document(move || {
        view! {
            <PageShell title="AI Movie Review".to_owned() max_width=HOME_WIDTH>
                <h1>"AI Movie Review — Home"</h1>
                <div style="display:grid;grid-template-columns:repeat(auto-fill, minmax(180px, 1fr));gap:16px">
                    {movies.into_iter().map(|card| view! { <MovieTile card=card /> }).collect_view()}
                </div>
            </PageShell>
        }
    })
}

#[must_use]
pub fn render_movie(movie: Option<&Value>) -> String {
    let title = movie
        .and_then(|m| m.get("title"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_owned();
    let record = match movie {
        Some(m) => serde_json::to_string_pretty(m).unwrap_or_else(|_| "null".to_owned()),
        None => "null".to_owned(),
    };

    let heading = title.clone();

    render_document(move || {
        view! {
            <PageShell title=title max_width=DETAIL_WIDTH>
                <a href="/">"← Back"</a>
                <h1>{heading}</h1>
                <pre style="white-space:pre-wrap">{record}</pre>
            </PageShell>
        }
    })
}

fn render_error(err: &ApiError) -> String {
    let message = err.to_string();
    render_document(move || {
        view! {
            <PageShell title="Error".to_owned() max_width=DETAIL_WIDTH>
                <a href="/">"← Back"</a>
                <h1>"Something went wrong"</h1>
                <pre style="white-space:pre-wrap">{message}</pre>
            </PageShell>
        }
    })
}

fn render_document<V, F>(page: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    let html = owner.with(|| page().to_html());
    format!("<!DOCTYPE html>{html}")
}

// =============================================================================
// COMPONENTS
// =============================================================================

#[component]
fn PageShell(title: String, max_width: u32, children: Children) -> impl IntoView {
    let main_style = format!("max-width:{max_width}px;margin:40px auto;padding:0 16px;font-family:system-ui");
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
            </head>
            <body>
                <main style=main_style>{children()}</main>
            </body>
        </html>
    }
}

/// One grid card linking to the detail page.
#[component]
fn MovieTile(card: MovieCard) -> impl IntoView {
    let href = format!("/movies/{}", id_segment(&card.id));
    view! {
        <a
            class="card"
            href=href
            style="text-decoration:none;color:inherit;border:1px solid #eee;border-radius:12px;padding:12px"
        >
            <div style="font-weight:600">{card.title.unwrap_or_default()}</div>
            <div style="opacity:.7;font-size:12px">{card.release_date.unwrap_or_default()}</div>
        </a>
    }
}

/// Path segment for a record id: numbers and strings as-is.
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
