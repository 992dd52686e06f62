//! Error types for the Kickoff application.

use crate::session::Phase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Kickoff application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum KickoffError {
    /// Recoverable input error (empty vision, empty team). Does not
    /// advance the phase.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation was invoked while the state machine is in the wrong
    /// phase. Surfaced as a hard error so callers can distinguish
    /// "not ready yet" from "succeeded".
    #[error("Operation '{operation}' is not valid in phase {phase}")]
    InvalidPhase { phase: Phase, operation: String },

    /// The question/agent provider failed. Recoverable: the gated
    /// transition can be retried, partial results are never merged.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A persisted session blob is corrupt or inconsistent. Recovered
    /// automatically by discarding the blob, never surfaced to the user.
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    /// Storage access error (file system operations)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KickoffError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidPhase error
    pub fn invalid_phase(phase: Phase, operation: impl Into<String>) -> Self {
        Self::InvalidPhase {
            phase,
            operation: operation.into(),
        }
    }

    /// Creates a Provider error
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Creates an InvalidSessionState error
    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::InvalidSessionState(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an InvalidPhase error
    pub fn is_invalid_phase(&self) -> bool {
        matches!(self, Self::InvalidPhase { .. })
    }

    /// Check if this is a Provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Check if this is an InvalidSessionState error
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, Self::InvalidSessionState(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this error can be retried or corrected by the caller
    /// without losing session state.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Provider(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for KickoffError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for KickoffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for KickoffError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for KickoffError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for KickoffError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, KickoffError>`.
pub type Result<T> = std::result::Result<T, KickoffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_phase_display() {
        let err = KickoffError::invalid_phase(Phase::Vision, "confirm_team");
        assert_eq!(
            err.to_string(),
            "Operation 'confirm_team' is not valid in phase VISION"
        );
        assert!(err.is_invalid_phase());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(KickoffError::validation("empty vision").is_recoverable());
        assert!(KickoffError::provider("timeout").is_recoverable());
        assert!(!KickoffError::internal("bug").is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: KickoffError = io.into();
        assert!(matches!(err, KickoffError::Storage { .. }));
    }
}
