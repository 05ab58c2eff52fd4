// src/repositories/movie_store.rs
//
// Local Store contract
//
// The store is synchronous; async callers hop onto the blocking pool.
// Every write commits before its change notification goes out, so a
// subscriber that re-reads after a notification only ever sees whole
// transactions.

use tokio::sync::broadcast;

use crate::domain::Category;
use crate::error::AppResult;
use crate::repositories::records::{MovieDetailsEntity, MovieEntity};

/// Table touched by a committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Movies,
    MovieDetails,
}

/// Rows touched by a favourite update, per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FavouriteUpdate {
    pub summaries: usize,
    pub details: usize,
}

impl FavouriteUpdate {
    pub fn is_noop(&self) -> bool {
        self.summaries == 0 && self.details == 0
    }
}

/// Favourite flag lookup bound to an open write transaction.
pub trait FavouriteLookup {
    /// Current favourite flag for `id` across every summary row and the
    /// detail row. `None` when no row of either kind exists.
    fn favourite_of(&self, id: i64) -> AppResult<Option<bool>>;
}

/// Builds the rows of a category inside the replace transaction.
pub type CategoryBuilder<'a> =
    dyn FnMut(&dyn FavouriteLookup) -> AppResult<Vec<MovieEntity>> + 'a;

/// Builds a detail row inside the upsert transaction.
pub type DetailsBuilder<'a> = dyn FnMut(&dyn FavouriteLookup) -> AppResult<MovieDetailsEntity> + 'a;

pub trait MovieStore: Send + Sync {
    /// Replace every summary row of `category` with the rows produced by
    /// `build`, in one transaction. Rows are stamped with `category` and
    /// keep the order they were built in. Returns the number of rows written.
    fn replace_category(&self, category: Category, build: &mut CategoryBuilder<'_>)
        -> AppResult<usize>;

    /// Insert or replace the detail row produced by `build`, in one transaction.
    fn upsert_details(&self, build: &mut DetailsBuilder<'_>) -> AppResult<MovieDetailsEntity>;

    /// First summary row for `id`, whichever category it is cached under.
    fn find_movie(&self, id: i64) -> AppResult<Option<MovieEntity>>;

    fn find_details(&self, id: i64) -> AppResult<Option<MovieDetailsEntity>>;

    /// Summary rows of one category in catalog order.
    fn list_by_category(&self, category: Category) -> AppResult<Vec<MovieEntity>>;

    /// Favourite movies across categories, one row per id, by title.
    fn list_favourites(&self) -> AppResult<Vec<MovieEntity>>;

    /// Case-insensitive unanchored title match, one row per id, by title.
    fn search_titles(&self, needle: &str) -> AppResult<Vec<MovieEntity>>;

    fn set_movie_favourite(&self, id: i64, is_favourite: bool) -> AppResult<usize>;

    fn set_details_favourite(&self, id: i64, is_favourite: bool) -> AppResult<usize>;

    /// Update both record kinds for `id` in one transaction.
    /// Missing rows of either kind are not an error.
    fn set_favourite(&self, id: i64, is_favourite: bool) -> AppResult<FavouriteUpdate>;

    /// Subscribe to committed-change notifications.
    fn changes(&self) -> broadcast::Receiver<StoreChange>;
}
