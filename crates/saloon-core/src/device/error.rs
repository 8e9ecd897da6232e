use super::backend::PlatformError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified camera failure.
///
/// Each variant maps to a different remediation for the user; its `Display`
/// output is the message shown next to the retry control.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceError {
    #[error("No camera detected on this device. Please connect a camera or check your hardware.")]
    NoDevice,

    #[error("Camera access was denied. Please update your settings to allow camera use.")]
    PermissionDenied,

    #[error("Could not start camera. Please ensure no other app is using it and try again.")]
    Unknown {
        /// Raw platform error name, when one was reported
        name: Option<String>,
    },
}

impl DeviceError {
    /// Maps a raw platform error name to a classification.
    pub fn from_platform_name(name: &str) -> Self {
        match name {
            "NotFoundError" | "DevicesNotFoundError" => Self::NoDevice,
            "NotAllowedError" | "PermissionDeniedError" => Self::PermissionDenied,
            other => Self::Unknown {
                name: Some(other.to_string()),
            },
        }
    }

    /// Classifies the error from the final ladder rung.
    pub fn classify(last_error: Option<&PlatformError>) -> Self {
        match last_error {
            Some(err) => Self::from_platform_name(&err.name),
            None => Self::Unknown { name: None },
        }
    }
}
