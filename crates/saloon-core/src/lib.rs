//! Core of the Saloon hairstyle try-on flow.
//!
//! A session moves through capture, analysis, style selection and
//! generation. [`session::SessionOrchestrator`] drives it, using a
//! [`device::DeviceNegotiator`] for the camera, a [`capture::FrameCapturer`]
//! for stills and the two [`gateway`] traits for the remote AI calls.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod device;
pub mod error;
pub mod gateway;
pub mod payload;
pub mod session;
pub mod style;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export common types
pub use analysis::AnalysisResult;
pub use error::SaloonError;
pub use payload::ImagePayload;
pub use session::{Session, SessionOrchestrator, Stage, StepOutcome};
pub use style::{Hairstyle, StyleCatalog};
