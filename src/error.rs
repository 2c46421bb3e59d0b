//! Error types for the call projection layer
//!
//! `CallSdkError` is the boundary error type the wrapped SDK surface reports
//! through the capability traits in [`crate::sdk`]. The teeing layer records
//! these failures into shared state and re-surfaces them to the caller
//! unchanged; nothing in this crate swallows or retries one.

use thiserror::Error;

/// Result type for operations crossing into the wrapped SDK
pub type SdkResult<T> = Result<T, CallSdkError>;

/// Errors reported by the wrapped calling SDK
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallSdkError {
    /// The underlying operation was rejected by the SDK or the service
    #[error("operation rejected: {message}")]
    OperationRejected { message: String },

    /// A requested feature is not available on this call
    #[error("feature unavailable: {feature}")]
    FeatureUnavailable { feature: String },

    /// The call is in a state that does not permit the operation
    #[error("invalid call state: {message}")]
    InvalidCallState { message: String },

    /// The SDK lost its connection to the service mid-operation
    #[error("connection lost: {message}")]
    ConnectionLost { message: String },

    /// Internal error
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl CallSdkError {
    /// Create an operation-rejected error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::OperationRejected {
            message: message.into(),
        }
    }

    /// Create a feature-unavailable error
    pub fn feature_unavailable(feature: impl Into<String>) -> Self {
        Self::FeatureUnavailable {
            feature: feature.into(),
        }
    }

    /// Create an invalid-call-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidCallState {
            message: message.into(),
        }
    }

    /// Create a connection-lost error
    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
