// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between presentation and the catalog service
// - Coordinators hold screen state; the service holds none
// - Errors leave this layer as `ErrorResponse`

pub mod coordinators;
pub mod error_handling;
pub mod state;

pub use coordinators::{
    CategoryFeed, DetailsFeed, FavouritesFeed, Home, QueryState, SearchFeed,
};
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
