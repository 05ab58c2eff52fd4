// src/integrations/catalog_api.rs

use async_trait::async_trait;

use crate::domain::Category;
use crate::error::AppResult;
use crate::integrations::tmdb::dto::{MovieDetailsDto, MovieItemDto};

/// Remote Client seam: stateless request/response access to the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// First page of the listing for `category`.
    async fn list_movies(&self, category: Category) -> AppResult<Vec<MovieItemDto>>;

    /// Detail record for `id`; `Ok(None)` when the catalog has no such movie.
    async fn movie_details(&self, id: i64) -> AppResult<Option<MovieDetailsDto>>;
}
