// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Consistent JSON error format for the UI
// - Never exposes internal implementation details
// - Logs the full error for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Character or episode does not exist (404)
    NotFound,

    /// Remote catalog unreachable, failing, or returning garbage
    Network,

    /// Local key-value store failure
    Storage,

    /// Superseded by a newer request
    Cancelled,

    /// Invalid input
    Validation,

    /// Anything else
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound | AppError::HttpStatus { status: 404, .. } => {
                Self::new(ErrorType::NotFound, "Resource not found", None)
            }

            AppError::Cancelled => Self::new(ErrorType::Cancelled, "Request cancelled", None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Invalid input",
                Some(domain_error.to_string()),
            ),

            e if e.is_network() => {
                log::warn!("Network error: {:?}", e);
                Self::new(
                    ErrorType::Network,
                    "Could not reach the character catalog",
                    Some(e.to_string()),
                )
            }

            e if e.is_storage() => {
                log::error!("Storage error: {:?}", e);
                Self::new(
                    ErrorType::Storage,
                    "Local storage operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }

            e => {
                log::error!("Internal error: {:?}", e);
                Self::new(ErrorType::Internal, "Internal error", None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}
