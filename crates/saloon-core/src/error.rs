//! Error types for the Saloon session core.

use crate::device::DeviceError;
use crate::session::Stage;
use thiserror::Error;

/// A shared error type for the session core.
///
/// Remote gateway failures never surface through this type: the orchestrator
/// converts them into state transitions. What remains are device failures,
/// rejected user actions, and local I/O or encoding problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaloonError {
    /// Camera acquisition failed after the whole constraint ladder
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// An asynchronous operation is already in flight
    #[error("Session is busy in stage {stage}")]
    Busy { stage: Stage },

    /// The requested action does not apply to the current stage
    #[error("Action requires stage {expected}, but session is in {actual}")]
    InvalidStage { expected: Stage, actual: Stage },

    /// Caller violated a contract (e.g. capture before the stream is ready)
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Image encoding or decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SaloonError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Image error
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the action was rejected because an operation is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this is a device error
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SaloonError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SaloonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SaloonError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for SaloonError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for SaloonError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

/// A type alias for `Result<T, SaloonError>`.
pub type Result<T> = std::result::Result<T, SaloonError>;
