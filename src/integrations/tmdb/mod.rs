// src/integrations/tmdb/mod.rs

pub mod client;
pub mod dto;

pub use client::TmdbClient;
pub use dto::{GenreDto, MovieDetailsDto, MovieItemDto, MovieListResponseDto};
