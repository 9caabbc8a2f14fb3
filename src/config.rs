//! Runtime configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default constant except the database location and the
//! TMDB token. The database URL may be given directly or composed from the
//! `POSTGRES_*` variables used by the compose setup.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_POSTGRES_HOST: &str = "db";
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INGEST_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Token placeholder shipped in the sample `.env`.
const TMDB_PLACEHOLDER_PREFIX: &str = "PUT_YOUR_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Process-level settings for the HTTP server and worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Base URL the page handlers use to reach the movies API.
    pub site_api_base_url: String,
    pub ingest_interval_secs: u64,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Required (one of):
    /// - `DATABASE_URL`
    /// - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB` (host from `POSTGRES_HOST`, default `db`)
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_API_BASE_URL`: default `http://127.0.0.1:{PORT}/api`
    /// - `INGEST_INTERVAL_SECS`: default 21600, must be a positive number
    ///
    /// # Errors
    ///
    /// Returns an error if the database location is missing, `PORT` is not a
    /// number, or `INGEST_INTERVAL_SECS` is not a positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = database_url_from_env()?;
        let site_api_base_url = std::env::var("SITE_API_BASE_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{port}/api"))
            .trim_end_matches('/')
            .to_string();
        let ingest_interval_secs = match std::env::var("INGEST_INTERVAL_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::Invalid { var: "INGEST_INTERVAL_SECS", value: raw }),
            },
            Err(_) => DEFAULT_INGEST_INTERVAL_SECS,
        };

        Ok(Self { database_url, port, site_api_base_url, ingest_interval_secs })
    }
}

fn database_url_from_env() -> Result<String, ConfigError> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }

    let user = std::env::var("POSTGRES_USER").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
    let password = std::env::var("POSTGRES_PASSWORD").map_err(|_| ConfigError::Missing("POSTGRES_PASSWORD"))?;
    let db = std::env::var("POSTGRES_DB").map_err(|_| ConfigError::Missing("POSTGRES_DB"))?;
    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env_parse("POSTGRES_PORT", DEFAULT_POSTGRES_PORT);

    Ok(format!("postgres://{user}:{password}@{host}:{port}/{db}"))
}

/// Settings for the TMDB client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl TmdbConfig {
    /// Build TMDB config from environment variables.
    ///
    /// - `TMDB_API_KEY`: v4 read access token, required
    /// - `TMDB_BASE_URL`: default `https://api.themoviedb.org/3`
    /// - `TMDB_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unset, empty, or still the sample placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| ConfigError::Missing("TMDB_API_KEY"))?;
        let api_key = validate_tmdb_token(api_key)?;
        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TMDB_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = env_parse("TMDB_TIMEOUT_SECS", DEFAULT_TMDB_TIMEOUT_SECS);

        Ok(Self { api_key, base_url, timeout_secs })
    }
}

fn validate_tmdb_token(raw: String) -> Result<String, ConfigError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(ConfigError::Missing("TMDB_API_KEY"));
    }
    if token.starts_with(TMDB_PLACEHOLDER_PREFIX) {
        return Err(ConfigError::Invalid { var: "TMDB_API_KEY", value: token.to_string() });
    }
    Ok(token.to_string())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
