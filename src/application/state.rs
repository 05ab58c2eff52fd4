// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseStats,
};
use crate::application::coordinators::{DetailsFeed, FavouritesFeed, Home, SearchFeed};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::{CatalogApi, TmdbClient};
use crate::repositories::SqliteMovieStore;
use crate::services::CatalogService;

/// Application state handed to the presentation layer.
/// All fields are Arc-wrapped for thread-safe sharing across screens.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pool: Arc<ConnectionPool>,
}

impl AppState {
    /// Open the local cache and connect to the catalog described by `config`.
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        let api = Arc::new(TmdbClient::from_config(&config)?);
        Self::with_catalog(config, api)
    }

    /// Same as `initialize` with an explicit catalog client.
    pub fn with_catalog(config: AppConfig, api: Arc<dyn CatalogApi>) -> AppResult<Self> {
        log::info!("Opening movie cache at {}", config.database_path.display());

        let pool = Arc::new(create_connection_pool(
            &config.database_path,
            config.pool_size,
        )?);

        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }

        let store = Arc::new(SqliteMovieStore::new(Arc::clone(&pool)));
        let event_bus = Arc::new(create_event_bus());

        let catalog_service = Arc::new(CatalogService::new(
            api,
            store,
            Arc::clone(&event_bus),
            config.image_base_url.clone(),
        ));

        Ok(Self {
            config,
            event_bus,
            catalog_service,
            pool,
        })
    }

    pub fn home(&self) -> Home {
        Home::new(Arc::clone(&self.catalog_service))
    }

    pub fn favourites(&self) -> FavouritesFeed {
        FavouritesFeed::new(Arc::clone(&self.catalog_service))
    }

    /// Must be called from within a tokio runtime.
    pub fn search(&self) -> SearchFeed {
        SearchFeed::new(
            Arc::clone(&self.catalog_service),
            self.config.search_debounce,
        )
    }

    pub fn details(&self, movie_id: i64) -> DetailsFeed {
        DetailsFeed::new(Arc::clone(&self.catalog_service), movie_id)
    }

    pub fn database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = get_connection(&self.pool)?;
        get_database_stats(&conn)
    }
}
