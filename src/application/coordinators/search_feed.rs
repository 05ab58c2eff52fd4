// src/application/coordinators/search_feed.rs
//
// Search as the user types
//
// CRITICAL RULES:
// - Query changes inside the debounce window collapse to the latest one
// - A query equal to the one already applied is ignored
// - Applying a query abandons the previous one; its results never show

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::coordinators::query_state::{LiveQuery, QueryState};
use crate::domain::Movie;
use crate::services::CatalogService;

pub struct SearchFeed {
    input: watch::Sender<String>,
    query: Arc<LiveQuery<Vec<Movie>>>,
    driver: JoinHandle<()>,
}

impl SearchFeed {
    /// Start the feed. Must be called from within a tokio runtime.
    pub fn new(service: Arc<CatalogService>, debounce: Duration) -> Self {
        let (input, input_rx) = watch::channel(String::new());
        let query = Arc::new(LiveQuery::new(QueryState::Ready(Vec::new())));

        let driver = tokio::spawn(drive(service, Arc::clone(&query), input_rx, debounce));

        Self {
            input,
            query,
            driver,
        }
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.input.send_replace(text.into());
    }

    pub fn state(&self) -> watch::Receiver<QueryState<Vec<Movie>>> {
        self.query.subscribe()
    }

    pub fn current(&self) -> QueryState<Vec<Movie>> {
        self.query.current()
    }
}

impl Drop for SearchFeed {
    fn drop(&mut self) {
        self.driver.abort();
        self.query.stop();
    }
}

async fn drive(
    service: Arc<CatalogService>,
    query: Arc<LiveQuery<Vec<Movie>>>,
    mut input: watch::Receiver<String>,
    debounce: Duration,
) {
    let mut applied = input.borrow_and_update().trim().to_string();

    while input.changed().await.is_ok() {
        // Quiet period: every further change restarts the window
        loop {
            tokio::select! {
                _ = tokio::time::sleep(debounce) => break,
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let latest = input.borrow_and_update().trim().to_string();
        if latest == applied {
            continue;
        }

        log::debug!("Searching for {:?}", latest);
        query.follow(service.search(&latest));
        applied = latest;
    }
}
