use crate::analysis::AnalysisResult;
use crate::device::DeviceError;
use crate::payload::ImagePayload;
use crate::style::Hairstyle;
use serde::Serialize;
use strum::Display;

/// Stage of the capture / analyze / generate journey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Live camera view, waiting for the user to take a photo
    #[default]
    Capturing,
    /// Photo sent to the analysis gateway
    Analyzing,
    /// Analysis available, waiting for the user to pick a style
    SelectingStyle,
    /// Photo and style sent to the synthesis gateway
    Generating,
    /// Generated image available for display and export
    Result,
}

/// User-visible notice left by the last failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Notice {
    /// Analysis failed and the generic fallback was substituted
    AnalysisFallback,
    /// Synthesis failed for the given style
    SynthesisFailed { style_id: String },
    /// Camera could not be started
    Device(DeviceError),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::AnalysisFallback => {
                "AI analysis failed. Let's try picking a style manually!".to_string()
            }
            Self::SynthesisFailed { .. } => {
                "The AI had trouble styling your photo. Please try a different angle or lighting."
                    .to_string()
            }
            Self::Device(err) => err.to_string(),
        }
    }
}

/// The single mutable aggregate for one user journey.
///
/// Only `SessionOrchestrator` writes these fields; everyone else reads a
/// snapshot through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub(super) stage: Stage,
    pub(super) captured_image: Option<ImagePayload>,
    pub(super) analysis: Option<AnalysisResult>,
    pub(super) selected_style: Option<Hairstyle>,
    pub(super) generated_image: Option<ImagePayload>,
    pub(super) busy: bool,
    pub(super) notice: Option<Notice>,
}

impl Session {
    /// A fresh session in the initial stage.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn captured_image(&self) -> Option<&ImagePayload> {
        self.captured_image.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn selected_style(&self) -> Option<&Hairstyle> {
        self.selected_style.as_ref()
    }

    pub fn generated_image(&self) -> Option<&ImagePayload> {
        self.generated_image.as_ref()
    }

    /// True while an asynchronous operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Checks the ordering invariants between optional fields.
    pub fn is_consistent(&self) -> bool {
        let style_after_analysis = self.selected_style.is_none() || self.analysis.is_some();
        let image_after_style = self.generated_image.is_none() || self.selected_style.is_some();
        let analysis_after_capture = self.analysis.is_none() || self.captured_image.is_some();
        style_after_analysis && image_after_style && analysis_after_capture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_initial() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::Capturing);
        assert!(session.captured_image().is_none());
        assert!(session.analysis().is_none());
        assert!(session.selected_style().is_none());
        assert!(session.generated_image().is_none());
        assert!(!session.is_busy());
        assert!(session.notice().is_none());
        assert!(session.is_consistent());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::SelectingStyle.to_string(), "SELECTING_STYLE");
        assert_eq!(Stage::Result.to_string(), "RESULT");
    }

    #[test]
    fn test_generated_image_without_style_is_inconsistent() {
        let session = Session {
            generated_image: Some(ImagePayload::new("image/png", "AAAA")),
            ..Session::new()
        };
        assert!(!session.is_consistent());
    }

    #[test]
    fn test_device_notice_uses_remediation_message() {
        let notice = Notice::Device(DeviceError::PermissionDenied);
        assert_eq!(notice.message(), DeviceError::PermissionDenied.to_string());
    }
}
