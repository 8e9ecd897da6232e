//! Still-frame capture from a live device stream.

use crate::device::DeviceStream;
use crate::error::{Result, SaloonError};
use crate::payload::{ImagePayload, JPEG_MIME};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Snapshots the current frame of a stream into a JPEG payload.
///
/// The raster is taken in raw sensor orientation. The selfie mirror exists
/// only in [`DeviceStream::preview_frame`] and never reaches a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCapturer {
    quality: u8,
}

impl Default for FrameCapturer {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl FrameCapturer {
    /// Quality is clamped to 1..=100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encodes the stream's current frame.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the stream has not reported its frame
    /// dimensions yet or has been released.
    pub fn capture(&self, stream: &DeviceStream) -> Result<ImagePayload> {
        let dimensions = stream.dimensions().ok_or_else(|| {
            SaloonError::precondition("capture requested before the stream reported frame dimensions")
        })?;
        let frame = stream
            .raw_frame()
            .ok_or_else(|| SaloonError::precondition("stream has no frame available"))?;

        let raster = fit_to(frame, dimensions.width, dimensions.height);

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode_image(&DynamicImage::ImageRgb8(raster))?;

        tracing::debug!(%dimensions, bytes = bytes.len(), "Frame captured");
        Ok(ImagePayload::from_bytes(JPEG_MIME, &bytes))
    }
}

/// Renders `frame` into a raster of the sink's native size.
fn fit_to(frame: RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.dimensions() == (width, height) {
        frame
    } else {
        imageops::resize(&frame, width, height, FilterType::Triangle)
    }
}
