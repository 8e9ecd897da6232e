use super::backend::{FrameDimensions, MediaBackend, PlatformError};
use super::constraints::{ConstraintDescriptor, default_ladder};
use super::error::DeviceError;
use super::stream::DeviceStream;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Acquires camera streams by walking a constraint ladder.
///
/// `DeviceNegotiator` is responsible for:
/// - Trying each rung in order until one yields a ready stream
/// - Classifying the final failure into a [`DeviceError`]
/// - Owning the active stream and lending it out for captures
/// - Releasing the stream when the capture view goes away
pub struct DeviceNegotiator {
    backend: Arc<dyn MediaBackend>,
    ladder: Vec<ConstraintDescriptor>,
    active: Mutex<Option<DeviceStream>>,
}

impl DeviceNegotiator {
    /// Creates a negotiator using the default ladder.
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self {
            backend,
            ladder: default_ladder(),
            active: Mutex::new(None),
        }
    }

    /// Replaces the ladder. An empty ladder falls back to the bare request.
    pub fn with_ladder(mut self, ladder: Vec<ConstraintDescriptor>) -> Self {
        self.ladder = if ladder.is_empty() {
            vec![ConstraintDescriptor::any()]
        } else {
            ladder
        };
        self
    }

    pub fn ladder(&self) -> &[ConstraintDescriptor] {
        &self.ladder
    }

    /// Walks the ladder and returns the first stream whose sink became ready.
    ///
    /// The returned stream is not installed; see [`Self::install`].
    pub async fn negotiate(&self) -> Result<DeviceStream, DeviceError> {
        let mut last_error: Option<PlatformError> = None;

        for (rung, constraints) in self.ladder.iter().enumerate() {
            let source = match self.backend.open(constraints).await {
                Ok(source) => source,
                Err(err) => {
                    warn!(rung, constraints = %constraints, error = %err.name, "Camera attempt failed");
                    last_error = Some(err);
                    continue;
                }
            };

            let mut stream = DeviceStream::attach(source, constraints.clone());
            match stream.wait_ready().await {
                Ok(dimensions) => {
                    info!(rung, constraints = %constraints, %dimensions, "Camera stream ready");
                    return Ok(stream);
                }
                Err(err) => {
                    warn!(rung, constraints = %constraints, error = %err.name, "Camera stream never became ready");
                    stream.release();
                    last_error = Some(err);
                }
            }
        }

        let error = DeviceError::classify(last_error.as_ref());
        warn!(attempts = self.ladder.len(), error = ?error, "Constraint ladder exhausted");
        Err(error)
    }

    /// Makes `stream` the active stream, releasing any previous one.
    pub async fn install(&self, stream: DeviceStream) -> Option<FrameDimensions> {
        let dimensions = stream.dimensions();
        let mut active = self.active.lock().await;
        if let Some(mut previous) = active.replace(stream) {
            previous.release();
        }
        dimensions
    }

    /// Negotiates a stream and installs it.
    pub async fn acquire(&self) -> Result<FrameDimensions, DeviceError> {
        let stream = self.negotiate().await?;
        self.install(stream)
            .await
            .ok_or(DeviceError::Unknown { name: None })
    }

    /// Stops and drops the active stream. No-op when nothing is active.
    pub async fn release(&self) {
        let mut active = self.active.lock().await;
        if let Some(mut stream) = active.take() {
            stream.release();
        } else {
            debug!("Release requested with no active camera stream");
        }
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.as_ref().is_some_and(|s| s.is_ready())
    }

    /// Lends the active stream to `f` for the duration of the call.
    pub async fn with_active<R>(&self, f: impl FnOnce(&DeviceStream) -> R) -> Option<R> {
        let active = self.active.lock().await;
        active.as_ref().map(f)
    }
}
