// src/application/coordinators/home.rs
//
// Home screen: one feed per category tab plus the selected tab.
// The selection lives here, never in the catalog service.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;

use crate::application::coordinators::category_feed::CategoryFeed;
use crate::application::error_handling::ErrorResponse;
use crate::domain::Category;
use crate::error::AppResult;
use crate::services::CatalogService;

pub struct Home {
    /// Indexed in `Category::ALL` order
    feeds: [CategoryFeed; 4],
    selected: watch::Sender<Category>,
}

impl Home {
    pub fn new(service: Arc<CatalogService>) -> Self {
        let (selected, _) = watch::channel(Category::NowPlaying);
        Self {
            feeds: Category::ALL.map(|category| CategoryFeed::new(Arc::clone(&service), category)),
            selected,
        }
    }

    pub fn feed(&self, category: Category) -> &CategoryFeed {
        &self.feeds[category as usize]
    }

    pub fn feeds(&self) -> impl Iterator<Item = &CategoryFeed> {
        self.feeds.iter()
    }

    pub fn select(&self, category: Category) {
        self.selected.send_if_modified(|current| {
            if *current == category {
                return false;
            }
            *current = category;
            true
        });
    }

    pub fn selected(&self) -> watch::Receiver<Category> {
        self.selected.subscribe()
    }

    pub fn selected_feed(&self) -> &CategoryFeed {
        self.feed(*self.selected.borrow())
    }

    /// Activate every tab at once. Each refresh succeeds or fails on its
    /// own; failures show up as per-tab notices.
    pub async fn start(&self) -> Vec<(Category, AppResult<usize>)> {
        let results = join_all(self.feeds.iter().map(|feed| feed.activate())).await;

        let outcomes: Vec<(Category, AppResult<usize>)> =
            Category::ALL.into_iter().zip(results).collect();

        let failed = outcomes.iter().filter(|(_, result)| result.is_err()).count();
        if failed > 0 {
            log::warn!("{} of {} categories failed to refresh", failed, outcomes.len());
        }

        outcomes
    }

    /// Current refresh notices, by tab.
    pub fn notices(&self) -> Vec<(Category, ErrorResponse)> {
        self.feeds
            .iter()
            .filter_map(|feed| feed.current_notice().map(|notice| (feed.category(), notice)))
            .collect()
    }
}
