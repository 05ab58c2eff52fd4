// src/mappers.rs
//
// Pure conversions between wire DTOs, storage records and domain records.
// Nothing here performs I/O or fails: absent optional wire fields become
// `None` or empty strings.

use crate::domain::{Category, Movie, MovieDetails};
use crate::integrations::tmdb::dto::{GenreDto, MovieDetailsDto, MovieItemDto};
use crate::repositories::records::{MovieDetailsEntity, MovieEntity};

/// Separator of the stored genre list. Genre names containing it do not
/// round-trip.
pub const GENRE_SEPARATOR: &str = ",";

/// First four characters of a `YYYY-MM-DD` date; empty when absent.
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .map(|date| date.trim().chars().take(4).collect())
        .unwrap_or_default()
}

/// Absolute image URL for a relative catalog path.
pub fn image_url(base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

pub fn join_genres(genres: &[GenreDto]) -> String {
    genres
        .iter()
        .map(|genre| genre.name.as_str())
        .collect::<Vec<_>>()
        .join(GENRE_SEPARATOR)
}

pub fn movie_entity_from_dto(
    dto: &MovieItemDto,
    category: Category,
    image_base_url: &str,
    is_favourite: bool,
) -> MovieEntity {
    MovieEntity {
        id: dto.id,
        title: dto.title.clone(),
        poster_url: image_url(image_base_url, dto.poster_path.as_deref()),
        release_year: release_year(dto.release_date.as_deref()),
        average_rating: dto.vote_average,
        category,
        is_favourite,
    }
}

pub fn details_entity_from_dto(
    dto: &MovieDetailsDto,
    image_base_url: &str,
    is_favourite: bool,
) -> MovieDetailsEntity {
    MovieDetailsEntity {
        id: dto.id,
        title: dto.title.clone(),
        poster_url: image_url(image_base_url, dto.poster_path.as_deref()),
        backdrop_url: image_url(image_base_url, dto.backdrop_path.as_deref()),
        tagline: dto.tagline.clone(),
        release_year: release_year(dto.release_date.as_deref()),
        average_rating: dto.vote_average,
        vote_count: dto.vote_count,
        overview: dto.overview.clone().unwrap_or_default(),
        genres: join_genres(&dto.genres),
        is_favourite,
    }
}

impl From<MovieEntity> for Movie {
    fn from(entity: MovieEntity) -> Self {
        Movie {
            id: entity.id,
            title: entity.title,
            poster_url: entity.poster_url,
            release_year: entity.release_year,
            average_rating: entity.average_rating,
            is_favourite: entity.is_favourite,
        }
    }
}

impl From<MovieDetailsEntity> for MovieDetails {
    fn from(entity: MovieDetailsEntity) -> Self {
        MovieDetails {
            id: entity.id,
            title: entity.title,
            poster_url: entity.poster_url,
            backdrop_url: entity.backdrop_url,
            tagline: entity.tagline,
            release_year: entity.release_year,
            average_rating: entity.average_rating,
            vote_count: entity.vote_count,
            overview: entity.overview,
            genres: entity.genres,
            is_favourite: entity.is_favourite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn genre(name: &str) -> GenreDto {
        GenreDto {
            id: 0,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_release_year_truncates_date() {
        assert_eq!(release_year(Some("2010-05-01")), "2010");
        assert_eq!(release_year(Some("199")), "199");
        assert_eq!(release_year(Some("")), "");
        assert_eq!(release_year(None), "");
    }

    #[test]
    fn test_image_url_joins_paths() {
        assert_eq!(
            image_url(IMAGE_BASE, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            image_url("https://img.test/", Some("abc.jpg")).as_deref(),
            Some("https://img.test/abc.jpg")
        );
        assert_eq!(image_url(IMAGE_BASE, Some("  ")), None);
        assert_eq!(image_url(IMAGE_BASE, None), None);
    }

    #[test]
    fn test_genres_join_with_separator() {
        assert_eq!(join_genres(&[genre("Action"), genre("Drama")]), "Action,Drama");
        assert_eq!(join_genres(&[]), "");
    }

    #[test]
    fn test_comma_in_genre_name_is_lossy() {
        let stored = join_genres(&[genre("Action, Adventure"), genre("Drama")]);
        let split: Vec<&str> = stored.split(GENRE_SEPARATOR).collect();
        assert_eq!(split.len(), 3);
    }

    #[test]
    fn test_movie_entity_from_dto() {
        let dto = MovieItemDto {
            id: 1,
            title: "A".to_string(),
            poster_path: Some("/a.jpg".to_string()),
            release_date: Some("2010-05-01".to_string()),
            vote_average: 7.2,
        };

        let entity = movie_entity_from_dto(&dto, Category::Popular, IMAGE_BASE, true);

        assert_eq!(entity.id, 1);
        assert_eq!(entity.release_year, "2010");
        assert_eq!(entity.category, Category::Popular);
        assert_eq!(entity.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/a.jpg"));
        assert!(entity.is_favourite);

        let movie = Movie::from(entity);
        assert_eq!(movie.title, "A");
        assert_eq!(movie.average_rating, 7.2);
        assert!(movie.is_favourite);
    }

    #[test]
    fn test_sparse_details_degrade_to_empty() {
        let dto = MovieDetailsDto {
            id: 42,
            title: "Heat".to_string(),
            poster_path: None,
            backdrop_path: Some("/back.jpg".to_string()),
            tagline: None,
            release_date: None,
            vote_average: 0.0,
            vote_count: 0,
            overview: None,
            genres: Vec::new(),
        };

        let details = MovieDetails::from(details_entity_from_dto(&dto, IMAGE_BASE, false));

        assert_eq!(details.poster_url, None);
        assert_eq!(
            details.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/back.jpg")
        );
        assert_eq!(details.tagline, None);
        assert_eq!(details.release_year, "");
        assert_eq!(details.overview, "");
        assert_eq!(details.genres, "");
        assert!(!details.is_favourite);
    }
}
