// src/application/coordinators/details_feed.rs

use std::sync::Arc;

use futures_util::future;
use futures_util::StreamExt;
use tokio::sync::watch;

use crate::application::coordinators::query_state::{LiveQuery, QueryState};
use crate::application::error_handling::ErrorResponse;
use crate::domain::MovieDetails;
use crate::error::AppResult;
use crate::repositories::FavouriteUpdate;
use crate::services::CatalogService;

/// Detail screen of one movie.
///
/// A failed load has no cached fallback, so it shows as `Failed`. Once
/// loaded, the state follows the cached record.
pub struct DetailsFeed {
    movie_id: i64,
    service: Arc<CatalogService>,
    query: LiveQuery<MovieDetails>,
}

impl DetailsFeed {
    pub fn new(service: Arc<CatalogService>, movie_id: i64) -> Self {
        Self {
            movie_id,
            service,
            query: LiveQuery::new(QueryState::Loading),
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn state(&self) -> watch::Receiver<QueryState<MovieDetails>> {
        self.query.subscribe()
    }

    pub fn current(&self) -> QueryState<MovieDetails> {
        self.query.current()
    }

    /// Load the detail record and keep following it. Safe to call again
    /// as a retry after a failure.
    pub async fn load(&self) -> AppResult<()> {
        let publisher = self.query.reset();

        match self.service.get_details(self.movie_id).await {
            Ok(details) => {
                publisher.publish(QueryState::Ready(details));

                let updates = self
                    .service
                    .observe_details(self.movie_id)
                    .filter_map(future::ready)
                    .boxed();
                self.query.attach(publisher, updates);
                Ok(())
            }
            Err(e) => {
                publisher.publish(QueryState::Failed(ErrorResponse::from_app_error(&e)));
                Err(e)
            }
        }
    }

    pub async fn toggle_favourite(&self, is_favourite: bool) -> AppResult<FavouriteUpdate> {
        self.service
            .toggle_favourite(self.movie_id, is_favourite)
            .await
    }
}
