//! End-to-end session runs through the public API.

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use saloon_core::device::{
    ConstraintDescriptor, DeviceNegotiator, FrameDimensions, MediaBackend, MediaSource,
    PlatformError,
};
use saloon_core::gateway::{AnalysisGateway, GatewayError, SynthesisGateway};
use saloon_core::style::builtin_catalog;
use saloon_core::{
    AnalysisResult, ImagePayload, SessionOrchestrator, Stage, StepOutcome,
    capture::FrameCapturer,
};
use std::sync::{Arc, Mutex};

const MARK: Rgb<u8> = Rgb([230, 10, 10]);

/// Camera that only honours the bare rung of the ladder.
struct PickyCamera {
    frame: RgbImage,
}

struct StillSource(Option<RgbImage>);

#[async_trait]
impl MediaSource for StillSource {
    async fn loaded_metadata(&self) -> Result<FrameDimensions, PlatformError> {
        let frame = self.0.as_ref().ok_or_else(|| PlatformError::new("AbortError", "stopped"))?;
        Ok(FrameDimensions::new(frame.width(), frame.height()))
    }

    fn current_frame(&self) -> Option<RgbImage> {
        self.0.clone()
    }

    fn stop_tracks(&mut self) {
        self.0 = None;
    }
}

#[async_trait]
impl MediaBackend for PickyCamera {
    async fn open(
        &self,
        constraints: &ConstraintDescriptor,
    ) -> Result<Box<dyn MediaSource>, PlatformError> {
        if !constraints.is_bare() {
            return Err(PlatformError::new("OverconstrainedError", "unsupported mode"));
        }
        Ok(Box::new(StillSource(Some(self.frame.clone()))))
    }
}

/// Records the frame it saw and answers with a fixed result.
#[derive(Default)]
struct RecordingAnalysis {
    seen: Mutex<Option<ImagePayload>>,
}

#[async_trait]
impl AnalysisGateway for RecordingAnalysis {
    async fn analyze(&self, image: &ImagePayload) -> Result<AnalysisResult, GatewayError> {
        *self.seen.lock().unwrap() = Some(image.clone());
        Ok(AnalysisResult::new(
            "Square",
            ["Buzz Cut", "Modern Undercut"],
            ["Strong Jawline"],
        ))
    }
}

struct EchoSynthesis;

#[async_trait]
impl SynthesisGateway for EchoSynthesis {
    async fn synthesize(
        &self,
        _image: &ImagePayload,
        directive: &str,
    ) -> Result<ImagePayload, GatewayError> {
        Ok(ImagePayload::from_bytes("image/png", directive.as_bytes()))
    }
}

fn left_marked_frame() -> RgbImage {
    RgbImage::from_fn(80, 40, |x, _| if x < 20 { MARK } else { Rgb([240, 240, 240]) })
}

#[tokio::test]
async fn test_full_session_with_builtin_catalog() {
    let analysis = Arc::new(RecordingAnalysis::default());
    let orchestrator = SessionOrchestrator::new(
        DeviceNegotiator::new(Arc::new(PickyCamera {
            frame: left_marked_frame(),
        })),
        FrameCapturer::default(),
        analysis.clone(),
        Arc::new(EchoSynthesis),
        Arc::new(builtin_catalog().clone()),
    );

    // only the last rung succeeds; no error reaches the session
    assert_eq!(
        orchestrator.start_camera().await.unwrap(),
        StepOutcome::Advanced(Stage::Capturing)
    );
    assert!(orchestrator.snapshot().await.notice().is_none());

    assert_eq!(
        orchestrator.capture().await.unwrap(),
        StepOutcome::Advanced(Stage::SelectingStyle)
    );

    // the analysed photo is a JPEG in raw sensor orientation
    let seen = analysis.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.mime_type(), "image/jpeg");
    let decoded = image::load_from_memory(&seen.decode().unwrap()).unwrap().to_rgb8();
    let left = decoded.get_pixel(5, decoded.height() / 2);
    let right = decoded.get_pixel(decoded.width() - 5, decoded.height() / 2);
    assert!(left[0] > 180 && left[1] < 80, "mark should stay on the left: {left:?}");
    assert!(right[1] > 180, "right side should be background: {right:?}");

    let session = orchestrator.snapshot().await;
    assert!(session.analysis().unwrap().recommends("Buzz Cut"));

    let outcome = orchestrator.select_style("buzz").await.unwrap();
    assert_eq!(outcome, StepOutcome::Advanced(Stage::Result));

    let exported = orchestrator.export().await.unwrap();
    let directive = &builtin_catalog().get("buzz").unwrap().directive;
    assert_eq!(exported.decode().unwrap(), directive.as_bytes());
    assert_eq!(
        orchestrator.export_file_name().await.as_deref(),
        Some("saloon-look-buzz.png")
    );

    orchestrator.reset().await;
    assert_eq!(orchestrator.stage().await, Stage::Capturing);
    assert!(orchestrator.export().await.is_none());
}
