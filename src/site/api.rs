//! Movies API client used by the page handlers.
//!
//! ERROR HANDLING
//! ==============
//! Any non-2xx status is an error carrying the request path and status.
//! There is no retry; the page turns the error into an error response.

use std::time::Duration;

use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API {path} -> {status}")]
    Status { path: String, status: u16 },

    #[error("API {path} request failed: {message}")]
    Request { path: String, message: String },

    #[error("API {path} returned invalid JSON: {message}")]
    Decode { path: String, message: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client rooted at `base_url` (e.g. `http://127.0.0.1:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on a non-2xx response, otherwise a
    /// request or decode error.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Request { path: path.to_owned(), message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { path: path.to_owned(), status: status.as_u16() });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Request { path: path.to_owned(), message: e.to_string() })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode { path: path.to_owned(), message: e.to_string() })
    }
}

/// Listing path used by the home page.
#[must_use]
pub fn movies_list_path(limit: u32) -> String {
    format!("/movies?limit={limit}")
}

/// Listing path scoped to a single movie, used by the detail page.
#[must_use]
pub fn movie_detail_path(id: i32) -> String {
    format!("/movies?limit=1&offset=0&id={id}")
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
