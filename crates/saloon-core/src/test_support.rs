//! Fakes shared by unit tests in this crate.

use crate::device::{
    ConstraintDescriptor, FrameDimensions, MediaBackend, MediaSource, PlatformError,
};
use async_trait::async_trait;
use image::{Rgb, RgbImage};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub(crate) const MARK: Rgb<u8> = Rgb([220, 20, 20]);
pub(crate) const BACKGROUND: Rgb<u8> = Rgb([245, 245, 245]);

/// A light frame with a red reference mark on the left quarter of the
/// raw sensor image.
pub(crate) fn marked_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 4 { MARK } else { BACKGROUND }
    })
}

pub(crate) fn is_mark(pixel: &Rgb<u8>) -> bool {
    pixel[0] > 160 && pixel[1] < 90 && pixel[2] < 90
}

pub(crate) struct FakeSource {
    frame: RgbImage,
    metadata_ok: bool,
    stops: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    stopped: bool,
}

#[async_trait]
impl MediaSource for FakeSource {
    async fn loaded_metadata(&self) -> Result<FrameDimensions, PlatformError> {
        if self.metadata_ok {
            Ok(FrameDimensions::new(self.frame.width(), self.frame.height()))
        } else {
            Err(PlatformError::new("AbortError", "metadata never loaded"))
        }
    }

    fn current_frame(&self) -> Option<RgbImage> {
        (!self.stopped).then(|| self.frame.clone())
    }

    fn stop_tracks(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.stops.fetch_add(1, Ordering::SeqCst);
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Backend whose `open` results follow a script.
///
/// `Err(name)` entries fail with that platform error name. Once the script
/// is exhausted every attempt succeeds, unless built with `always_failing`.
///
/// An `exclusive` backend refuses to open while another source is live, like
/// a webcam that only one consumer may hold. A `gated` backend parks every
/// `open` until [`FakeBackend::open_gate`] is called.
pub(crate) struct FakeBackend {
    script: Mutex<VecDeque<Result<(), &'static str>>>,
    exhausted_failure: Option<&'static str>,
    attempts: Mutex<Vec<ConstraintDescriptor>>,
    metadata_failures: Mutex<HashSet<usize>>,
    stops: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    stops_at_open: Mutex<Vec<usize>>,
    exclusive: bool,
    gate: Option<Arc<Notify>>,
    frame: RgbImage,
}

impl FakeBackend {
    pub(crate) fn scripted(script: Vec<Result<(), &'static str>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            exhausted_failure: None,
            attempts: Mutex::new(Vec::new()),
            metadata_failures: Mutex::new(HashSet::new()),
            stops: Arc::new(AtomicUsize::new(0)),
            live: Arc::new(AtomicUsize::new(0)),
            stops_at_open: Mutex::new(Vec::new()),
            exclusive: false,
            gate: None,
            frame: marked_frame(64, 32),
        }
    }

    pub(crate) fn exclusive() -> Self {
        Self {
            exclusive: true,
            ..Self::scripted(Vec::new())
        }
    }

    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::scripted(Vec::new())
        }
    }

    /// Lets one parked (or the next) `open` proceed.
    pub(crate) fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn always_failing(name: &'static str) -> Self {
        Self {
            exhausted_failure: Some(name),
            ..Self::scripted(Vec::new())
        }
    }

    pub(crate) fn with_frame(mut self, frame: RgbImage) -> Self {
        self.frame = frame;
        self
    }

    pub(crate) fn fail_metadata_on_attempt(&self, attempt: usize) {
        self.metadata_failures.lock().unwrap().insert(attempt);
    }

    pub(crate) fn attempts(&self) -> Vec<ConstraintDescriptor> {
        self.attempts.lock().unwrap().clone()
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Sources opened and not yet stopped.
    pub(crate) fn live_sources(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// The stop count observed by each successful `open`, in order.
    pub(crate) fn stops_at_open(&self) -> Vec<usize> {
        self.stops_at_open.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn open(
        &self,
        constraints: &ConstraintDescriptor,
    ) -> Result<Box<dyn MediaSource>, PlatformError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(constraints.clone());
            attempts.len() - 1
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.exclusive && self.live.load(Ordering::SeqCst) > 0 {
            return Err(PlatformError::new("NotReadableError", "device already in use"));
        }

        let next = self.script.lock().unwrap().pop_front();
        let outcome = match next {
            Some(outcome) => outcome,
            None => self.exhausted_failure.map_or(Ok(()), Err),
        };
        if let Err(name) = outcome {
            return Err(PlatformError::new(name, "scripted failure"));
        }

        self.live.fetch_add(1, Ordering::SeqCst);
        self.stops_at_open.lock().unwrap().push(self.stops());
        Ok(Box::new(FakeSource {
            frame: self.frame.clone(),
            metadata_ok: !self.metadata_failures.lock().unwrap().contains(&attempt),
            stops: self.stops.clone(),
            live: self.live.clone(),
            stopped: false,
        }))
    }
}
