//! File-backed virtual camera.
//!
//! The image file plays the role of the sensor feed: every frame is the
//! decoded file, in raw (unmirrored) orientation.

use async_trait::async_trait;
use image::RgbImage;
use saloon_core::device::{
    ConstraintDescriptor, FrameDimensions, MediaBackend, MediaSource, PlatformError,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// [`MediaBackend`] that "opens" a still image as a camera.
pub struct FileCameraBackend {
    path: PathBuf,
}

impl FileCameraBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MediaBackend for FileCameraBackend {
    async fn open(
        &self,
        constraints: &ConstraintDescriptor,
    ) -> Result<Box<dyn MediaSource>, PlatformError> {
        debug!(path = %self.path.display(), %constraints, "Opening file camera");

        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            let name = match err.kind() {
                ErrorKind::NotFound => "NotFoundError",
                ErrorKind::PermissionDenied => "NotAllowedError",
                _ => "NotReadableError",
            };
            PlatformError::new(name, format!("{}: {err}", self.path.display()))
        })?;

        let frame = image::load_from_memory(&bytes)
            .map_err(|err| PlatformError::new("NotReadableError", err.to_string()))?
            .to_rgb8();

        Ok(Box::new(FileSource { frame: Some(frame) }))
    }
}

struct FileSource {
    frame: Option<RgbImage>,
}

#[async_trait]
impl MediaSource for FileSource {
    async fn loaded_metadata(&self) -> Result<FrameDimensions, PlatformError> {
        self.frame
            .as_ref()
            .map(|f| FrameDimensions::new(f.width(), f.height()))
            .ok_or_else(|| PlatformError::new("InvalidStateError", "camera already stopped"))
    }

    fn current_frame(&self) -> Option<RgbImage> {
        self.frame.clone()
    }

    fn stop_tracks(&mut self) {
        self.frame = None;
    }
}
