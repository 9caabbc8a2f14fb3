//! TMDB client — trending movies feed and record normalization.
//!
//! Thin HTTP wrapper for `/trending/movie/{window}`. Response parsing and
//! normalization are pure functions so they can be tested without the network.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;
use time::macros::format_description;

use crate::config::TmdbConfig;

const TRENDING_LANGUAGE: &str = "en-US";
const CONNECT_TIMEOUT_SECS: u64 = 10;
const ERROR_BODY_PREVIEW_CHARS: usize = 200;
const UNTITLED: &str = "Untitled";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("TMDB token missing/invalid: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("TMDb request failed: {0}")]
    Request(String),

    #[error("TMDb error {status}: {body}")]
    Response { status: u16, body: String },

    #[error("TMDb response parse failed: {0}")]
    Parse(String),
}

/// Aggregation period of the trending feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    #[default]
    Day,
    Week,
}

impl TrendingWindow {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl std::str::FromStr for TrendingWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => Err(format!("unknown trending window '{other}' (expected 'day' or 'week')")),
        }
    }
}

/// Source of raw trending movie objects.
///
/// Implemented by [`TmdbClient`]; tests substitute canned feeds.
#[async_trait::async_trait]
pub trait TrendingSource: Send + Sync {
    /// Fetch the raw `results` array of the trending feed.
    ///
    /// # Errors
    ///
    /// Returns a [`TmdbError`] if the request fails, TMDB answers with a
    /// non-success status, or the body is not the expected JSON shape.
    async fn fetch_trending(&self, window: TrendingWindow) -> Result<Vec<Value>, TmdbError>;
}

/// A TMDB movie reduced to the columns stored in `movies`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMovie {
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub language: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<Date>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Build a client from `TMDB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or the HTTP client fails to build.
    pub fn from_env() -> Result<Self, TmdbError> {
        Self::new(TmdbConfig::from_env()?)
    }

    /// Build a client from a parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TmdbError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url })
    }

    #[must_use]
    pub fn trending_url(&self, window: TrendingWindow) -> String {
        format!("{}/trending/movie/{}", self.base_url, window.as_str())
    }
}

#[async_trait::async_trait]
impl TrendingSource for TmdbClient {
    async fn fetch_trending(&self, window: TrendingWindow) -> Result<Vec<Value>, TmdbError> {
        let response = self
            .http
            .get(self.trending_url(window))
            .query(&[("language", TRENDING_LANGUAGE)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| TmdbError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TmdbError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(TmdbError::Response {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
            });
        }

        parse_trending(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct TrendingPage {
    #[serde(default)]
    results: Vec<Value>,
}

fn parse_trending(json: &str) -> Result<Vec<Value>, TmdbError> {
    let page: TrendingPage = serde_json::from_str(json).map_err(|e| TmdbError::Parse(e.to_string()))?;
    Ok(page.results)
}

/// Reduce a raw TMDB movie object to its stored columns.
///
/// Returns `None` when the object carries no integer `id`. Empty strings are
/// treated as absent; an unparsable `release_date` is dropped.
#[must_use]
pub fn normalize_movie(item: &Value) -> Option<NormalizedMovie> {
    let tmdb_id = item.get("id")?.as_i64()?;

    let title = non_empty_str(item, "title")
        .or_else(|| non_empty_str(item, "name"))
        .unwrap_or(UNTITLED)
        .to_string();

    Some(NormalizedMovie {
        tmdb_id,
        title,
        original_title: owned_str(item, "original_title"),
        language: owned_str(item, "original_language"),
        overview: owned_str(item, "overview"),
        release_date: non_empty_str(item, "release_date").and_then(parse_release_date),
        poster_path: owned_str(item, "poster_path"),
        backdrop_path: owned_str(item, "backdrop_path"),
        popularity: item.get("popularity").and_then(Value::as_f64),
        vote_average: item.get("vote_average").and_then(Value::as_f64),
        vote_count: item
            .get("vote_count")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok()),
    })
}

fn non_empty_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn owned_str(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn parse_release_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
#[path = "tmdb_test.rs"]
mod tests;
