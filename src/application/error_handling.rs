// src/application/error_handling.rs
//
// Error Handling for the Presentation Boundary
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The catalog has no such movie
    NotFound,

    /// Invalid configuration or input
    Validation,

    /// Local cache failure
    Database,

    /// Catalog unreachable or rejecting requests
    ExternalService,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::not_found("Movie"),

            ErrorKind::RemoteUnavailable => {
                log::warn!("Catalog unavailable: {}", error);

                Self {
                            error_type: ErrorType::ExternalService,
                    message: "Catalog service unreachable".to_string(),
                    details: Some(error.to_string()),
                }
            }

            ErrorKind::RemoteRejected => {
                log::warn!("Catalog rejected request: {}", error);

                Self {
                            error_type: ErrorType::ExternalService,
                    message: "Catalog service rejected the request".to_string(),
                    details: Some(error.to_string()),
                }
            }

            ErrorKind::StoreUnavailable => {
                // Log full error for debugging
                log::error!("Local store error: {:?}", error);

                Self {
                            error_type: ErrorType::Database,
                    message: "Local cache unavailable".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            ErrorKind::Invalid => Self::validation(error.to_string()),
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }

    /// JSON form handed to the UI
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::from_app_error(error)
    }
}
