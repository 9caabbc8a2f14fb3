//! Browser-facing pages rendered on the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! The pages are clients of the movies API, not of the database: they reach
//! it over HTTP through [`api::ApiClient`], so they can be pointed at any
//! deployment of the API via `SITE_API_BASE_URL`.

pub mod api;
pub mod pages;
