// src/application/coordinators/mod.rs
//
// Query Coordinators
//
// One per observable surface. Each holds the latest state of its surface
// in a watch channel and decides when to (re)fetch.

pub mod category_feed;
pub mod details_feed;
pub mod favourites_feed;
pub mod home;
pub mod query_state;
pub mod search_feed;

#[cfg(test)]
mod coordinator_tests;

pub use category_feed::CategoryFeed;
pub use details_feed::DetailsFeed;
pub use favourites_feed::FavouritesFeed;
pub use home::Home;
pub use query_state::{LiveQuery, Publisher, QueryState};
pub use search_feed::SearchFeed;
