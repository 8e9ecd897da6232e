//! Session domain module.
//!
//! This module contains the session aggregate and the state machine that
//! mutates it.
//!
//! # Module Structure
//!
//! - `model`: Session aggregate (`Session`), stages (`Stage`), notices (`Notice`)
//! - `orchestrator`: the state machine (`SessionOrchestrator`)
//!
//! # Usage
//!
//! ```ignore
//! use saloon_core::session::{SessionOrchestrator, Stage, StepOutcome};
//!
//! orchestrator.start_camera().await?;
//! orchestrator.capture().await?;
//! if orchestrator.stage().await == Stage::SelectingStyle {
//!     orchestrator.select_style("fringe").await?;
//! }
//! ```

mod model;
mod orchestrator;


// Re-export public API
pub use model::{Notice, Session, Stage};
pub use orchestrator::{OrchestratorTimeouts, SessionOrchestrator, StepOutcome};
