//! # App Error Type
//!
//! Unified error type for intents and commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Intent / Command                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Sync Error? ──── SyncError::Server { 404, .. } ─────┐                 │
//! │         │                                             │                 │
//! │         ▼                                             ▼                 │
//! │  Core Error? ──── CoreError::NoActiveEdit ──────── AppError ──► caller │
//! │         │                                        { code, message }      │
//! │         ▼                                                               │
//! │  Success ─────────────────────────────────────────────────────► caller │
//! │                                                                         │
//! │  The notification center has already been updated by the time an      │
//! │  AppError reaches the caller; the error is for exit codes and --json.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "SERVER_ERROR",
//!   "message": "Failed to delete product: Product 7 not found"
//! }
//! ```

use serde::Serialize;
use stockroom_core::CoreError;
use stockroom_sync::SyncError;
use thiserror::Error;

/// Result type alias for intents and commands.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from intents and commands.
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the local store
    NotFound,

    /// Input rejected before any request
    ValidationError,

    /// Request could not be completed
    NetworkError,

    /// Backend answered with an error
    ServerError,

    /// No edit session to act on
    NoActiveEdit,

    /// Configuration missing or invalid
    ConfigError,
}

impl ErrorCode {
    /// Process exit code for this failure class.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::NoActiveEdit | ErrorCode::NotFound => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::NetworkError => 4,
            ErrorCode::ServerError => 5,
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }
}

/// Converts sync errors to app errors.
impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Validation(e) => AppError::validation(e.to_string()),
            SyncError::Network(e) => {
                tracing::error!("Network failure: {}", e);
                AppError::new(ErrorCode::NetworkError, "Could not reach the inventory backend")
            }
            SyncError::Server { status, body } => {
                AppError::new(ErrorCode::ServerError, format!("Backend returned {}: {}", status, body))
            }
            SyncError::Decode(e) => AppError::new(
                ErrorCode::ServerError,
                format!("Unexpected response from backend: {}", e),
            ),
            other => AppError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::NoActiveEdit => {
                AppError::new(ErrorCode::NoActiveEdit, "No edit session is open")
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ValidationError;

    #[test]
    fn test_sync_error_mapping() {
        let err: AppError = SyncError::Server {
            status: 404,
            body: "Product 7 not found".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ServerError);
        assert!(err.message.contains("Product 7 not found"));

        let err: AppError = SyncError::MissingBaseUrl.into();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.code.exit_code(), 3);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::ProductNotFound("p-9".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p-9");

        let err: AppError = CoreError::Validation(ValidationError::NotANumber {
            field: "quantity".into(),
            value: "ten".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(AppError::validation("bad")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad");
    }
}
