// src/error/types.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Network or transport failure talking to the catalog service.
    #[error("Catalog service unavailable: {0}")]
    RemoteUnavailable(String),

    /// Non-success status or malformed payload from the catalog service.
    #[error("Catalog service rejected request: {0}")]
    RemoteRejected(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Local store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by callers that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RemoteUnavailable,
    RemoteRejected,
    NotFound,
    StoreUnavailable,
    Invalid,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            AppError::RemoteRejected(_) => ErrorKind::RemoteRejected,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::StoreUnavailable(_) | AppError::Io(_) => ErrorKind::StoreUnavailable,
            AppError::Domain(_) | AppError::Config(_) => ErrorKind::Invalid,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound)
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::StoreUnavailable(format!("connection pool: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::StoreUnavailable(format!("store task aborted: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() || err.is_decode() {
            AppError::RemoteRejected(err.to_string())
        } else {
            AppError::RemoteUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::RemoteRejected(format!("malformed payload: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
