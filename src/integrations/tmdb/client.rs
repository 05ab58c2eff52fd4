// src/integrations/tmdb/client.rs
//
// TMDB catalog client
//
// ARCHITECTURE:
// - REST client for the movie catalog
// - Handles authentication, timeouts and status classification
// - Returns wire DTOs only; mapping to storage rows happens elsewhere
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches the local cache
// - Every request is built through `request`, which attaches the API key

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};

use crate::config::AppConfig;
use crate::domain::Category;
use crate::error::{AppError, AppResult};
use crate::integrations::catalog_api::CatalogApi;
use crate::integrations::tmdb::dto::{MovieDetailsDto, MovieItemDto, MovieListResponseDto};

/// Query parameter carrying the static credential
const API_KEY_PARAM: &str = "api_key";

pub struct TmdbClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl TmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http_client,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// The single place outbound requests are built.
    fn request(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(self.endpoint(path))
            .header(header::ACCEPT, "application/json")
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
    }

    async fn send(&self, path: &str) -> AppResult<Response> {
        log::debug!("GET {}", self.endpoint(path));

        self.request(path).send().await.map_err(|e| {
            AppError::RemoteUnavailable(format!("Catalog request {} failed: {}", path, e))
        })
    }

    async fn body(response: Response, path: &str) -> AppResult<Vec<u8>> {
        let bytes = response.bytes().await.map_err(|e| {
            AppError::RemoteUnavailable(format!("Reading catalog response {} failed: {}", path, e))
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn list_movies(&self, category: Category) -> AppResult<Vec<MovieItemDto>> {
        let path = format!("movie/{}", category.as_str());
        let response = self.send(&path).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RemoteRejected(format!(
                "Catalog returned status {} for {}",
                status, path
            )));
        }

        let body = Self::body(response, &path).await?;
        let page: MovieListResponseDto = serde_json::from_slice(&body)?;

        page.results.ok_or_else(|| {
            AppError::RemoteRejected(format!("Catalog listing {} carried no results", path))
        })
    }

    async fn movie_details(&self, id: i64) -> AppResult<Option<MovieDetailsDto>> {
        let path = format!("movie/{}", id);
        let response = self.send(&path).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::RemoteRejected(format!(
                "Catalog returned status {} for {}",
                status, path
            )));
        }

        let body = Self::body(response, &path).await?;
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        // A literal `null` body decodes to None as well
        let details: Option<MovieDetailsDto> = serde_json::from_slice(&body)?;
        Ok(details)
    }
}
