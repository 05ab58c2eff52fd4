// src/lib.rs
// MovieShelf - Local-first movie catalog cache
//
// Architecture:
// - Cache-aside: the catalog is fetched, the local cache is what gets read
// - Live: every listing is a stream that follows the cache
// - Local-first: the favourite flag exists only on this device
// - Explicit: no implicit refreshes, no hidden state in the service
// - Application Layer: coordinators own screen state

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod mappers;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{Category, DomainError, Movie, MovieDetails};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, CategoryRefreshFailed, CategoryRefreshed, DomainEvent, EventBus,
    EventLogEntry, FavouriteChanged, MovieDetailsCached,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool, DatabaseStats};

// ============================================================================
// PUBLIC API - Local Store
// ============================================================================

pub use repositories::{FavouriteUpdate, MovieStore, SqliteMovieStore, StoreChange};

// ============================================================================
// PUBLIC API - Catalog
// ============================================================================

pub use integrations::{CatalogApi, TmdbClient};
pub use services::{CatalogService, DetailsStream, MovieStream};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{
    AppState, CategoryFeed, DetailsFeed, ErrorResponse, ErrorType, FavouritesFeed, Home,
    QueryState, SearchFeed,
};
