// src/domain/mod.rs
//
// Domain Root
//
// Read-side records handed to presentation and the closed set of
// catalog categories. Everything here is plain data.

pub mod category;
pub mod movie;

pub use category::Category;
pub use movie::{Movie, MovieDetails};

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown catalog category: {0}")]
    UnknownCategory(String),
}
