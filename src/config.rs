// src/config.rs
//
// Runtime configuration
//
// Values come from the process environment (MOVIESHELF_*) with sensible
// defaults for everything except the API credential.

use std::path::PathBuf;
use std::time::Duration;

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_POOL_SIZE: u32 = 8;

const ENV_API_KEY: &str = "MOVIESHELF_API_KEY";
const ENV_BASE_URL: &str = "MOVIESHELF_BASE_URL";
const ENV_IMAGE_BASE_URL: &str = "MOVIESHELF_IMAGE_BASE_URL";
const ENV_DB_PATH: &str = "MOVIESHELF_DB_PATH";
const ENV_TIMEOUT_SECS: &str = "MOVIESHELF_TIMEOUT_SECS";
const ENV_POOL_SIZE: &str = "MOVIESHELF_POOL_SIZE";
const ENV_SEARCH_DEBOUNCE_MS: &str = "MOVIESHELF_SEARCH_DEBOUNCE_MS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Static credential appended to every catalog request
    pub api_key: String,
    pub base_url: String,
    /// Prefix joined with relative poster/backdrop paths
    pub image_base_url: String,
    pub database_path: PathBuf,
    pub request_timeout: Duration,
    pub pool_size: u32,
    pub search_debounce: Duration,
}

impl AppConfig {
    /// Configuration with defaults for everything but the credential.
    ///
    /// The database lives in the platform data directory:
    /// {APP_DATA}/movieshelf/movieshelf.db
    pub fn new(api_key: impl Into<String>) -> AppResult<Self> {
        Self::with_path(api_key, get_database_path()?)
    }

    /// Load configuration from MOVIESHELF_* environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .ok_or_else(|| AppError::Config(format!("{} is not set", ENV_API_KEY)))?;

        // Explicit database path wins; only fall back to the data dir when absent
        let database_path = match lookup(ENV_DB_PATH) {
            Some(path) => PathBuf::from(path),
            None => get_database_path()?,
        };

        let mut config = Self::with_path(api_key, database_path)?;

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(url) = lookup(ENV_IMAGE_BASE_URL) {
            config.image_base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &secs)?);
        }
        if let Some(size) = lookup(ENV_POOL_SIZE) {
            let size = parse_number(ENV_POOL_SIZE, &size)?;
            if size == 0 {
                return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_SIZE)));
            }
            config.pool_size = u32::try_from(size)
                .map_err(|_| AppError::Config(format!("{} is too large", ENV_POOL_SIZE)))?;
        }
        if let Some(ms) = lookup(ENV_SEARCH_DEBOUNCE_MS) {
            config.search_debounce =
                Duration::from_millis(parse_number(ENV_SEARCH_DEBOUNCE_MS, &ms)?);
        }

        Ok(config)
    }

    /// Defaults with an explicit database location (tests, embedded use).
    pub fn with_path(api_key: impl Into<String>, database_path: PathBuf) -> AppResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AppError::Config("API key must not be blank".to_string()));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            database_path,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pool_size: DEFAULT_POOL_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> AppResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("{} must be a non-negative integer: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "   "),
            (ENV_DB_PATH, "/tmp/movieshelf-test.db"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_defaults_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DB_PATH, "/tmp/movieshelf-test.db"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from("/tmp/movieshelf-test.db"));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DB_PATH, "/tmp/movieshelf-test.db"),
            (ENV_BASE_URL, "http://localhost:9000/3"),
            (ENV_IMAGE_BASE_URL, "http://localhost:9000/img"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_POOL_SIZE, "2"),
            (ENV_SEARCH_DEBOUNCE_MS, "50"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/3");
        assert_eq!(config.image_base_url, "http://localhost:9000/img");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.search_debounce, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DB_PATH, "/tmp/movieshelf-test.db"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_DB_PATH, "/tmp/movieshelf-test.db"),
            (ENV_POOL_SIZE, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
