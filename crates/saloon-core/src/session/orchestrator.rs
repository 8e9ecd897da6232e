use super::model::{Notice, Session, Stage};
use crate::analysis::AnalysisResult;
use crate::capture::FrameCapturer;
use crate::config::TimeoutConfig;
use crate::device::{DeviceError, DeviceNegotiator};
use crate::error::{Result, SaloonError};
use crate::gateway::{AnalysisGateway, GatewayError, SynthesisGateway};
use crate::payload::ImagePayload;
use crate::style::StyleCatalog;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

/// Upper bounds for the three suspension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorTimeouts {
    pub device: Duration,
    pub analysis: Duration,
    pub synthesis: Duration,
}

impl Default for OrchestratorTimeouts {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

impl From<&TimeoutConfig> for OrchestratorTimeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            device: config.device(),
            analysis: config.analysis(),
            synthesis: config.synthesis(),
        }
    }
}

/// What became of a user action that suspended on an async operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The operation succeeded and the session moved to this stage
    Advanced(Stage),
    /// The operation failed and the session recovered into this stage
    Recovered(Stage),
    /// A reset happened while the operation was in flight; its result was dropped
    Stale,
}

/// Epoch and cancellation token captured when an operation starts.
#[derive(Debug, Clone)]
struct Ticket {
    epoch: u64,
    cancel: CancellationToken,
}

struct SessionState {
    session: Session,
    epoch: u64,
    cancel: CancellationToken,
}

impl SessionState {
    fn new() -> Self {
        Self {
            session: Session::new(),
            epoch: 0,
            cancel: CancellationToken::new(),
        }
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            epoch: self.epoch,
            cancel: self.cancel.clone(),
        }
    }

    fn is_stale(&self, ticket: &Ticket) -> bool {
        self.epoch != ticket.epoch
    }

    /// Rejects the action unless the session is idle in `expected`.
    fn ensure_idle(&self, expected: Stage) -> Result<()> {
        if self.session.busy {
            return Err(SaloonError::Busy {
                stage: self.session.stage,
            });
        }
        if self.session.stage != expected {
            return Err(SaloonError::InvalidStage {
                expected,
                actual: self.session.stage,
            });
        }
        Ok(())
    }
}

enum Completion<T> {
    Finished(T),
    TimedOut(Duration),
    Cancelled,
}

impl<T> Completion<std::result::Result<T, GatewayError>> {
    fn into_gateway_result(self) -> std::result::Result<T, GatewayError> {
        match self {
            Self::Finished(result) => result,
            Self::TimedOut(limit) => Err(GatewayError::Timeout(limit)),
            Self::Cancelled => Err(GatewayError::request("operation cancelled by reset")),
        }
    }
}

/// Stores the frame and enters `Analyzing`. The caller holds the state lock
/// and has checked that the session is idle in `Capturing`.
fn begin_analysis(state: &mut SessionState, image: &ImagePayload) -> Ticket {
    state.session.captured_image = Some(image.clone());
    state.session.stage = Stage::Analyzing;
    state.session.busy = true;
    state.session.notice = None;
    state.ticket()
}

/// Races `operation` against the ticket's cancellation and a timeout.
///
/// Dropping the losing branch drops the in-flight future, which aborts any
/// network request it owns.
async fn suspend<F, T>(ticket: &Ticket, limit: Duration, operation: F) -> Completion<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        _ = ticket.cancel.cancelled() => Completion::Cancelled,
        outcome = tokio::time::timeout(limit, operation) => match outcome {
            Ok(value) => Completion::Finished(value),
            Err(_) => Completion::TimedOut(limit),
        },
    }
}

/// The finite-state machine driving one capture / analyze / generate journey.
///
/// `SessionOrchestrator` is the only writer of [`Session`]. It:
/// - Starts the camera and captures frames through the device negotiator
/// - Sequences the analysis and synthesis gateway calls
/// - Rejects any action that would start a second operation while one is in flight
/// - Maps every gateway failure to a recovery transition
/// - Drops late results from operations that a reset made stale
///
/// No lock is held across a gateway call, so `reset` can always interrupt.
pub struct SessionOrchestrator {
    state: Mutex<SessionState>,
    negotiator: DeviceNegotiator,
    capturer: FrameCapturer,
    analysis: Arc<dyn AnalysisGateway>,
    synthesis: Arc<dyn SynthesisGateway>,
    catalog: Arc<StyleCatalog>,
    timeouts: OrchestratorTimeouts,
}

impl SessionOrchestrator {
    pub fn new(
        negotiator: DeviceNegotiator,
        capturer: FrameCapturer,
        analysis: Arc<dyn AnalysisGateway>,
        synthesis: Arc<dyn SynthesisGateway>,
        catalog: Arc<StyleCatalog>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            negotiator,
            capturer,
            analysis,
            synthesis,
            catalog,
            timeouts: OrchestratorTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: OrchestratorTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// A copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.state.lock().await.session.clone()
    }

    pub async fn stage(&self) -> Stage {
        self.state.lock().await.session.stage
    }

    /// Number of resets so far.
    pub async fn epoch(&self) -> u64 {
        self.state.lock().await.epoch
    }

    pub async fn is_camera_active(&self) -> bool {
        self.negotiator.is_active().await
    }

    /// Starts (or restarts) the camera for the capture view.
    ///
    /// Any previously active stream is released before the ladder is walked.
    ///
    /// # Errors
    ///
    /// Returns the classified [`DeviceError`] when every rung failed; the
    /// session stays in `Capturing` so the user can retry.
    pub async fn start_camera(&self) -> Result<StepOutcome> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.ensure_idle(Stage::Capturing)?;
            state.session.busy = true;
            // a camera may refuse a second consumer, so the old stream goes first
            self.negotiator.release().await;
            state.ticket()
        };

        let span = info_span!("device", epoch = ticket.epoch);
        let completion = suspend(&ticket, self.timeouts.device, self.negotiator.negotiate())
            .instrument(span)
            .await;

        let mut state = self.state.lock().await;
        if state.is_stale(&ticket) {
            if let Completion::Finished(Ok(mut stream)) = completion {
                stream.release();
            }
            debug!(epoch = ticket.epoch, "Discarding stale camera acquisition");
            return Ok(StepOutcome::Stale);
        }
        state.session.busy = false;

        let result = match completion {
            Completion::Finished(result) => result,
            Completion::TimedOut(limit) => {
                warn!(?limit, "Camera acquisition timed out");
                Err(DeviceError::Unknown {
                    name: Some("TimeoutError".to_string()),
                })
            }
            Completion::Cancelled => return Ok(StepOutcome::Stale),
        };

        match result {
            Ok(stream) => {
                let dimensions = self.negotiator.install(stream).await;
                state.session.notice = None;
                info!(epoch = ticket.epoch, ?dimensions, "Camera started");
                Ok(StepOutcome::Advanced(Stage::Capturing))
            }
            Err(err) => {
                state.session.notice = Some(Notice::Device(err.clone()));
                Err(SaloonError::Device(err))
            }
        }
    }

    /// Captures the current frame, releases the camera and runs analysis.
    ///
    /// # Errors
    ///
    /// Rejects the call if the session is not idle in `Capturing` or the
    /// camera has not reported frame dimensions yet.
    pub async fn capture(&self) -> Result<StepOutcome> {
        let (ticket, image) = {
            let mut state = self.state.lock().await;
            state.ensure_idle(Stage::Capturing)?;
            let image = self
                .negotiator
                .with_active(|stream| self.capturer.capture(stream))
                .await
                .ok_or_else(|| {
                    SaloonError::precondition("capture requested without an active camera stream")
                })??;
            // the capture view goes away once a photo is taken
            self.negotiator.release().await;
            let ticket = begin_analysis(&mut state, &image);
            (ticket, image)
        };
        self.run_analysis(ticket, image).await
    }

    /// Handles a captured frame: stores it and runs the analysis gateway.
    ///
    /// Analysis failure (including timeout) substitutes
    /// [`AnalysisResult::fallback`] and still moves on to style selection.
    pub async fn submit_frame(&self, image: ImagePayload) -> Result<StepOutcome> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.ensure_idle(Stage::Capturing)?;
            begin_analysis(&mut state, &image)
        };
        self.run_analysis(ticket, image).await
    }

    async fn run_analysis(&self, ticket: Ticket, image: ImagePayload) -> Result<StepOutcome> {
        info!(epoch = ticket.epoch, stage = %Stage::Analyzing, "Frame captured, analysing");

        let span = info_span!("analysis", epoch = ticket.epoch);
        let completion = suspend(&ticket, self.timeouts.analysis, self.analysis.analyze(&image))
            .instrument(span)
            .await;

        let mut state = self.state.lock().await;
        if state.is_stale(&ticket) || matches!(completion, Completion::Cancelled) {
            debug!(epoch = ticket.epoch, "Discarding stale analysis result");
            return Ok(StepOutcome::Stale);
        }
        state.session.busy = false;
        state.session.stage = Stage::SelectingStyle;

        match completion.into_gateway_result() {
            Ok(result) => {
                info!(
                    epoch = ticket.epoch,
                    stage = %Stage::SelectingStyle,
                    face_shape = result.face_shape(),
                    "Analysis complete"
                );
                state.session.analysis = Some(result);
                Ok(StepOutcome::Advanced(Stage::SelectingStyle))
            }
            Err(err) => {
                warn!(epoch = ticket.epoch, error = %err, "Analysis failed, using fallback result");
                state.session.analysis = Some(AnalysisResult::fallback());
                state.session.notice = Some(Notice::AnalysisFallback);
                Ok(StepOutcome::Recovered(Stage::SelectingStyle))
            }
        }
    }

    /// Applies the chosen catalog style to the captured photo.
    ///
    /// Synthesis failure returns to `SelectingStyle` with a notice; the photo
    /// and analysis are kept so the user can pick again.
    ///
    /// # Errors
    ///
    /// Rejects the call if the session is not idle in `SelectingStyle`, no
    /// photo was captured, or `style_id` is not in the catalog.
    pub async fn select_style(&self, style_id: &str) -> Result<StepOutcome> {
        let (ticket, image, style) = {
            let mut state = self.state.lock().await;
            state.ensure_idle(Stage::SelectingStyle)?;
            let image = state.session.captured_image.clone().ok_or_else(|| {
                SaloonError::precondition("style selected before a photo was captured")
            })?;
            if state.session.analysis.is_none() {
                return Err(SaloonError::precondition(
                    "style selected before analysis was available",
                ));
            }
            let style = self
                .catalog
                .get(style_id)
                .cloned()
                .ok_or_else(|| SaloonError::not_found("hairstyle", style_id))?;

            state.session.selected_style = Some(style.clone());
            state.session.stage = Stage::Generating;
            state.session.busy = true;
            state.session.notice = None;
            (state.ticket(), image, style)
        };
        info!(epoch = ticket.epoch, style_id = %style.id, stage = %Stage::Generating, "Generating hairstyle");

        let span = info_span!("synthesis", epoch = ticket.epoch, style_id = %style.id);
        let completion = suspend(
            &ticket,
            self.timeouts.synthesis,
            self.synthesis.synthesize(&image, &style.directive),
        )
        .instrument(span)
        .await;

        let mut state = self.state.lock().await;
        if state.is_stale(&ticket) || matches!(completion, Completion::Cancelled) {
            debug!(epoch = ticket.epoch, "Discarding stale synthesis result");
            return Ok(StepOutcome::Stale);
        }
        state.session.busy = false;

        match completion.into_gateway_result() {
            Ok(generated) => {
                info!(epoch = ticket.epoch, style_id = %style.id, stage = %Stage::Result, "Hairstyle generated");
                state.session.generated_image = Some(generated);
                state.session.stage = Stage::Result;
                Ok(StepOutcome::Advanced(Stage::Result))
            }
            Err(err) => {
                warn!(epoch = ticket.epoch, style_id = %style.id, error = %err, "Synthesis failed");
                state.session.stage = Stage::SelectingStyle;
                state.session.notice = Some(Notice::SynthesisFailed { style_id: style.id });
                Ok(StepOutcome::Recovered(Stage::SelectingStyle))
            }
        }
    }

    /// Discards the whole session and returns to `Capturing`.
    ///
    /// Any in-flight operation is cancelled and its eventual result ignored;
    /// the active camera stream is released.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.cancel.cancel();
        state.epoch = state.epoch.wrapping_add(1);
        state.cancel = CancellationToken::new();
        state.session = Session::new();
        self.negotiator.release().await;
        info!(epoch = state.epoch, stage = %Stage::Capturing, "Session reset");
    }

    /// The generated image, if any. Pure read; not a transition.
    pub async fn export(&self) -> Option<ImagePayload> {
        self.state.lock().await.session.generated_image.clone()
    }

    /// Suggested file name for the exported image.
    pub async fn export_file_name(&self) -> Option<String> {
        let state = self.state.lock().await;
        let image = state.session.generated_image.as_ref()?;
        let style = state.session.selected_style.as_ref()?;
        Some(format!("saloon-look-{}.{}", style.id, image.extension()))
    }
}
