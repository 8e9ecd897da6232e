//! Platform media seam.
//!
//! A front end plugs its camera stack in by implementing [`MediaBackend`]. The
//! negotiator never inspects platform errors beyond their `name`.

use super::constraints::ConstraintDescriptor;
use async_trait::async_trait;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Native frame size reported by a video sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Raw error from the platform media subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// Error identifier, e.g. `NotAllowedError`
    pub name: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for PlatformError {}

/// A live camera feed handed out by the platform.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Resolves once frame metadata is known.
    async fn loaded_metadata(&self) -> Result<FrameDimensions, PlatformError>;

    /// The current frame in raw sensor orientation, or `None` when no frame
    /// has been produced yet.
    fn current_frame(&self) -> Option<RgbImage>;

    /// Stops every underlying media track.
    fn stop_tracks(&mut self);
}

/// Opens camera feeds for a given set of constraints.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    async fn open(
        &self,
        constraints: &ConstraintDescriptor,
    ) -> Result<Box<dyn MediaSource>, PlatformError>;
}
