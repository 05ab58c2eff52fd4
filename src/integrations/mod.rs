// src/integrations/mod.rs
//
// External Integrations Module
//
// The catalog service is reached only through `CatalogApi`.

pub mod catalog_api;
pub mod tmdb;

pub use catalog_api::CatalogApi;
pub use tmdb::{GenreDto, MovieDetailsDto, MovieItemDto, MovieListResponseDto, TmdbClient};
