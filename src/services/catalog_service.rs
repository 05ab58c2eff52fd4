// src/services/catalog_service.rs
//
// Catalog Service - cache-aside access to the movie catalog
//
// CRITICAL RULES:
// - Read surfaces never call the catalog; they follow the local store
// - The cache is only written after a verified remote success
// - The favourite flag is local-only and survives every remote write
// - No lock or transaction is held across a network call

use std::sync::Arc;

use futures_util::stream::{self, BoxStream};

use crate::domain::{Category, Movie, MovieDetails};
use crate::error::{AppError, AppResult};
use crate::events::{
    CategoryRefreshFailed, CategoryRefreshed, EventBus, FavouriteChanged, MovieDetailsCached,
};
use crate::integrations::CatalogApi;
use crate::mappers::{details_entity_from_dto, movie_entity_from_dto};
use crate::repositories::{FavouriteUpdate, MovieEntity, MovieStore, StoreChange};
use crate::services::live_query::live;
use crate::services::run_blocking;

/// Continuously updated movie list.
pub type MovieStream = BoxStream<'static, Vec<Movie>>;

/// Continuously updated detail record; `None` while it is not cached.
pub type DetailsStream = BoxStream<'static, Option<MovieDetails>>;

pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn MovieStore>,
    event_bus: Arc<EventBus>,
    image_base_url: String,
}

impl CatalogService {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        store: Arc<dyn MovieStore>,
        event_bus: Arc<EventBus>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            event_bus,
            image_base_url: image_base_url.into(),
        }
    }

    // ========================================================================
    // LIVE READ SURFACES
    // ========================================================================

    /// Cached movies of `category` in catalog order.
    pub fn list_by_category(&self, category: Category) -> MovieStream {
        live(
            Arc::clone(&self.store),
            StoreChange::Movies,
            format!("category:{}", category),
            move |store| store.list_by_category(category).map(into_movies),
        )
    }

    /// Favourite movies across every category, one entry per movie.
    pub fn list_favourites(&self) -> MovieStream {
        live(
            Arc::clone(&self.store),
            StoreChange::Movies,
            "favourites".to_string(),
            |store| store.list_favourites().map(into_movies),
        )
    }

    /// Cached movies whose title contains `query`, ignoring case.
    ///
    /// A blank query yields a single empty list.
    pub fn search(&self, query: &str) -> MovieStream {
        let needle = query.trim().to_string();
        if needle.is_empty() {
            return Box::pin(stream::once(async { Vec::new() }));
        }

        live(
            Arc::clone(&self.store),
            StoreChange::Movies,
            format!("search:{}", needle),
            move |store| store.search_titles(&needle).map(into_movies),
        )
    }

    /// The cached detail record of `id`, if any. Never fetches.
    pub fn observe_details(&self, id: i64) -> DetailsStream {
        live(
            Arc::clone(&self.store),
            StoreChange::MovieDetails,
            format!("details:{}", id),
            move |store| Ok(store.find_details(id)?.map(MovieDetails::from)),
        )
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Replace the cached listing of `category` with the catalog's.
    ///
    /// On failure the cached rows are left untouched.
    pub async fn refresh_category(&self, category: Category) -> AppResult<usize> {
        log::info!("Refreshing {}", category);

        match self.fetch_and_replace(category).await {
            Ok(count) => {
                log::info!("Refreshed {}: {} movies", category, count);
                self.event_bus.emit(CategoryRefreshed::new(category, count));
                Ok(count)
            }
            Err(e) => {
                log::warn!("Refresh of {} failed, keeping cached rows: {}", category, e);
                self.event_bus.emit(CategoryRefreshFailed::new(
                    category,
                    e.kind(),
                    e.to_string(),
                ));
                Err(e)
            }
        }
    }

    async fn fetch_and_replace(&self, category: Category) -> AppResult<usize> {
        let items = self.api.list_movies(category).await?;

        let store = Arc::clone(&self.store);
        let image_base_url = self.image_base_url.clone();

        run_blocking(move || {
            store.replace_category(category, &mut |favourites| {
                items
                    .iter()
                    .map(|item| {
                        let is_favourite = favourites.favourite_of(item.id)?.unwrap_or(false);
                        Ok(movie_entity_from_dto(
                            item,
                            category,
                            &image_base_url,
                            is_favourite,
                        ))
                    })
                    .collect()
            })
        })
        .await
    }

    /// Detail record of `id`: served from cache when present, otherwise
    /// fetched once and cached.
    pub async fn get_details(&self, id: i64) -> AppResult<MovieDetails> {
        let store = Arc::clone(&self.store);
        if let Some(cached) = run_blocking(move || store.find_details(id)).await? {
            log::debug!("Details {} served from cache", id);
            return Ok(cached.into());
        }

        log::debug!("Details {} not cached, fetching", id);
        let dto = match self.api.movie_details(id).await? {
            Some(dto) => dto,
            None => {
                log::info!("Catalog has no movie {}", id);
                return Err(AppError::NotFound);
            }
        };
        if dto.id != id {
            log::warn!("Catalog answered details {} with movie {}", id, dto.id);
            return Err(AppError::RemoteRejected(format!(
                "details for {} returned movie {}",
                id, dto.id
            )));
        }

        let store = Arc::clone(&self.store);
        let image_base_url = self.image_base_url.clone();

        let entity = run_blocking(move || {
            store.upsert_details(&mut |favourites| {
                let is_favourite = favourites.favourite_of(dto.id)?.unwrap_or(false);
                Ok(details_entity_from_dto(&dto, &image_base_url, is_favourite))
            })
        })
        .await?;

        self.event_bus
            .emit(MovieDetailsCached::new(entity.id, entity.is_favourite));

        Ok(entity.into())
    }

    /// Set the favourite flag of `id` on every cached record of it.
    pub async fn toggle_favourite(&self, id: i64, is_favourite: bool) -> AppResult<FavouriteUpdate> {
        let store = Arc::clone(&self.store);
        let update = run_blocking(move || store.set_favourite(id, is_favourite)).await?;

        if update.is_noop() {
            log::debug!("Favourite toggle for {} touched no cached rows", id);
        } else {
            log::info!(
                "Movie {} favourite={} ({} summaries, {} details)",
                id,
                is_favourite,
                update.summaries,
                update.details
            );
        }

        self.event_bus.emit(FavouriteChanged::new(
            id,
            is_favourite,
            update.summaries,
            update.details,
        ));

        Ok(update)
    }
}

fn into_movies(entities: Vec<MovieEntity>) -> Vec<Movie> {
    entities.into_iter().map(Movie::from).collect()
}
