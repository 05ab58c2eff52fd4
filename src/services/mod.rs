// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod live_query;


pub use catalog_service::{CatalogService, DetailsStream, MovieStream};

use crate::error::AppResult;

/// Run a synchronous store call on the blocking pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
