// src/application/coordinators/category_feed.rs
//
// One category tab: the cached listing plus an unobtrusive notice for the
// last failed refresh. The listing keeps showing cached rows when the
// catalog is unreachable.

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::coordinators::query_state::{LiveQuery, QueryState};
use crate::application::error_handling::ErrorResponse;
use crate::domain::{Category, Movie};
use crate::error::AppResult;
use crate::repositories::FavouriteUpdate;
use crate::services::CatalogService;

pub struct CategoryFeed {
    category: Category,
    service: Arc<CatalogService>,
    query: LiveQuery<Vec<Movie>>,
    notice: watch::Sender<Option<ErrorResponse>>,
}

impl CategoryFeed {
    pub fn new(service: Arc<CatalogService>, category: Category) -> Self {
        let (notice, _) = watch::channel(None);
        Self {
            category,
            service,
            query: LiveQuery::new(QueryState::Loading),
            notice,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> watch::Receiver<QueryState<Vec<Movie>>> {
        self.query.subscribe()
    }

    pub fn current(&self) -> QueryState<Vec<Movie>> {
        self.query.current()
    }

    /// Error of the last refresh, cleared when a refresh starts.
    pub fn notice(&self) -> watch::Receiver<Option<ErrorResponse>> {
        self.notice.subscribe()
    }

    pub fn current_notice(&self) -> Option<ErrorResponse> {
        self.notice.borrow().clone()
    }

    /// Reset to `Loading`, follow the cached listing and refresh it once.
    pub async fn activate(&self) -> AppResult<usize> {
        self.query
            .follow(self.service.list_by_category(self.category));
        self.refresh().await
    }

    pub async fn refresh(&self) -> AppResult<usize> {
        self.notice.send_replace(None);

        self.service
            .refresh_category(self.category)
            .await
            .inspect_err(|e| {
                self.notice
                    .send_replace(Some(ErrorResponse::from_app_error(e)));
            })
    }

    pub async fn toggle_favourite(&self, id: i64, is_favourite: bool) -> AppResult<FavouriteUpdate> {
        self.service.toggle_favourite(id, is_favourite).await
    }
}
