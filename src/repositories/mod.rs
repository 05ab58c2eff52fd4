// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Stores are DUMB data mappers
// - NO refresh or merge policy (callers pass builders for that)
// - NO event emission (only table-change notifications)
// - Explicit SQL only

pub mod movie_store;
pub mod records;
pub mod sqlite_movie_store;

pub use movie_store::{
    CategoryBuilder, DetailsBuilder, FavouriteLookup, FavouriteUpdate, MovieStore, StoreChange,
};
pub use records::{MovieDetailsEntity, MovieEntity};
pub use sqlite_movie_store::SqliteMovieStore;
