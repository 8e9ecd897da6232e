use super::backend::{FrameDimensions, MediaSource, PlatformError};
use super::constraints::ConstraintDescriptor;
use image::RgbImage;
use image::imageops;
use std::fmt;

/// Live camera handle: a media source attached to a video sink.
///
/// The sink only reports dimensions after the source delivered its frame
/// metadata. Releasing stops all tracks and detaches the sink; it is
/// idempotent and also runs on drop, so a stream can never leak.
pub struct DeviceStream {
    source: Option<Box<dyn MediaSource>>,
    constraints: ConstraintDescriptor,
    dimensions: Option<FrameDimensions>,
}

impl DeviceStream {
    pub(crate) fn attach(source: Box<dyn MediaSource>, constraints: ConstraintDescriptor) -> Self {
        Self {
            source: Some(source),
            constraints,
            dimensions: None,
        }
    }

    /// Waits for the sink to report usable frame metadata.
    pub(crate) async fn wait_ready(&mut self) -> Result<FrameDimensions, PlatformError> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| PlatformError::new("InvalidStateError", "stream was released"))?;
        let dimensions = source.loaded_metadata().await?;
        if dimensions.is_empty() {
            return Err(PlatformError::new(
                "NotReadableError",
                format!("source reported empty frame size {dimensions}"),
            ));
        }
        self.dimensions = Some(dimensions);
        Ok(dimensions)
    }

    /// The rung of the ladder this stream was acquired with.
    pub fn constraints(&self) -> &ConstraintDescriptor {
        &self.constraints
    }

    /// Native frame size, once the sink is ready.
    pub fn dimensions(&self) -> Option<FrameDimensions> {
        self.dimensions
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.is_active() && self.dimensions.is_some()
    }

    /// The current frame exactly as the sensor delivers it.
    pub fn raw_frame(&self) -> Option<RgbImage> {
        self.source.as_ref()?.current_frame()
    }

    /// The current frame mirrored horizontally, for the live selfie preview.
    ///
    /// Display only: never feed this into capture.
    pub fn preview_frame(&self) -> Option<RgbImage> {
        self.raw_frame().map(|frame| imageops::flip_horizontal(&frame))
    }

    pub fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop_tracks();
            tracing::debug!(constraints = %self.constraints, "Camera stream released");
        }
        self.dimensions = None;
    }
}

impl Drop for DeviceStream {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for DeviceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceStream")
            .field("active", &self.is_active())
            .field("constraints", &self.constraints)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}
