// src/integrations/tmdb/dto.rs
//
// Wire shapes of the catalog service. Every field the catalog may omit
// has a serde default so a sparse payload still decodes.

use serde::{Deserialize, Serialize};

/// Page returned by `movie/{category}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListResponseDto {
    #[serde(default)]
    pub page: Option<u32>,
    /// `None` when the payload carried no `results` member at all
    #[serde(default)]
    pub results: Option<Vec<MovieItemDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieItemDto {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDto {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// Body of `movie/{movie_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailsDto {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_item_decodes() {
        let item: MovieItemDto = serde_json::from_str(r#"{"id": 12}"#).unwrap();
        assert_eq!(item.id, 12);
        assert_eq!(item.title, "");
        assert!(item.poster_path.is_none());
        assert!(item.release_date.is_none());
        assert_eq!(item.vote_average, 0.0);
    }

    #[test]
    fn test_null_fields_decode_as_absent() {
        let details: MovieDetailsDto = serde_json::from_str(
            r#"{"id": 42, "title": "Heat", "poster_path": null, "tagline": null, "genres": []}"#,
        )
        .unwrap();
        assert!(details.poster_path.is_none());
        assert!(details.tagline.is_none());
        assert!(details.overview.is_none());
    }

    #[test]
    fn test_listing_without_results_is_distinguishable() {
        let page: MovieListResponseDto = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(page.results.is_none());

        let page: MovieListResponseDto =
            serde_json::from_str(r#"{"page": 1, "results": []}"#).unwrap();
        assert_eq!(page.results.map(|r| r.len()), Some(0));
    }
}
