//! Domain services used by HTTP routes and the worker.
//!
//! ARCHITECTURE
//! ============
//! Service modules own TMDB access and persistence so route handlers stay
//! focused on request validation and status mapping.

pub mod ingest;
pub mod movie;
pub mod scheduler;
pub mod tmdb;
