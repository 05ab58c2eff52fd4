use serde::{Deserialize, Serialize};

/// Read-side projection of a cached movie summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    /// Four-digit year, or empty when the catalog had no release date
    pub release_year: String,
    /// Catalog average on a 0-10 scale
    pub average_rating: f64,
    pub is_favourite: bool,
}

/// Read-side projection of a cached detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub tagline: Option<String>,
    pub release_year: String,
    pub average_rating: f64,
    pub vote_count: i64,
    pub overview: String,
    /// Genre names joined with `,` exactly as stored
    pub genres: String,
    pub is_favourite: bool,
}
