// src/repositories/records.rs
//
// Storage records: the row shapes of the local cache tables.

use serde::{Deserialize, Serialize};

use crate::domain::Category;

/// One row of `movies`: a movie summary as cached under one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieEntity {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: String,
    pub average_rating: f64,
    pub category: Category,
    pub is_favourite: bool,
}

/// One row of `movie_details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailsEntity {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub tagline: Option<String>,
    pub release_year: String,
    pub average_rating: f64,
    pub vote_count: i64,
    pub overview: String,
    pub genres: String,
    pub is_favourite: bool,
}
