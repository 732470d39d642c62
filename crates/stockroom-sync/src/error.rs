//! # Sync Error Types
//!
//! Error types for backend operations.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Validation     │  │   Network       │  │     Server              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Client-side    │  │  Transport did  │  │  Non-2xx status,        │ │
//! │  │  pre-check; no  │  │  not complete;  │  │  body shown verbatim    │ │
//! │  │  request sent   │  │  generic message│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Decode       │  │  Configuration  │                              │
//! │  │                 │  │                 │                              │
//! │  │  2xx with a body│  │  InvalidConfig  │                              │
//! │  │  that is not a  │  │  InvalidUrl     │                              │
//! │  │  product list   │  │  MissingBaseUrl │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! │                                                                         │
//! │  Every category is terminal: nothing is retried.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::ValidationError;
use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all possible backend failures.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Client-side
    // =========================================================================
    /// Input rejected before any request was built.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Transport / Server
    // =========================================================================
    /// The request could not be completed.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The backend answered 2xx with a body that could not be decoded.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No backend base URL configured.
    #[error("Backend base URL not configured. Set STOCKROOM_API_URL or [api].base_url.")]
    MissingBaseUrl,

    /// Base URL is not a usable http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::Decode(err.to_string())
        } else {
            SyncError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// True for client-side pre-check failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Validation(_))
    }

    /// True when the request never completed.
    pub fn is_network(&self) -> bool {
        matches!(self, SyncError::Network(_))
    }

    /// True when the backend answered, but not with what was asked for.
    pub fn is_server(&self) -> bool {
        matches!(self, SyncError::Server { .. } | SyncError::Decode(_))
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::MissingBaseUrl
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(SyncError::Network("refused".into()).is_network());
        assert!(SyncError::Server { status: 404, body: "nope".into() }.is_server());
        assert!(SyncError::Decode("not json".into()).is_server());
        assert!(SyncError::MissingBaseUrl.is_config_error());

        let validation: SyncError = ValidationError::NotANumber {
            field: "quantity".into(),
            value: "ten".into(),
        }
        .into();
        assert!(validation.is_validation());
        assert!(!validation.is_network());
    }

    #[test]
    fn test_server_error_display_keeps_body() {
        let err = SyncError::Server {
            status: 400,
            body: "quantity must be >= 0".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("quantity must be >= 0"));
    }
}
