// src/application/coordinators/favourites_feed.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::coordinators::query_state::{LiveQuery, QueryState};
use crate::domain::Movie;
use crate::error::AppResult;
use crate::repositories::FavouriteUpdate;
use crate::services::CatalogService;

/// Favourite movies across every category.
pub struct FavouritesFeed {
    service: Arc<CatalogService>,
    query: LiveQuery<Vec<Movie>>,
}

impl FavouritesFeed {
    pub fn new(service: Arc<CatalogService>) -> Self {
        Self {
            service,
            query: LiveQuery::new(QueryState::Loading),
        }
    }

    pub fn state(&self) -> watch::Receiver<QueryState<Vec<Movie>>> {
        self.query.subscribe()
    }

    pub fn current(&self) -> QueryState<Vec<Movie>> {
        self.query.current()
    }

    pub fn activate(&self) {
        self.query.follow(self.service.list_favourites());
    }

    pub async fn toggle_favourite(&self, id: i64, is_favourite: bool) -> AppResult<FavouriteUpdate> {
        self.service.toggle_favourite(id, is_favourite).await
    }
}
