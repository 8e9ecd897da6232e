//! Camera device negotiation.
//!
//! # Module Structure
//!
//! - `backend`: platform seam (`MediaBackend`, `MediaSource`, `PlatformError`)
//! - `constraints`: capability descriptors and the default constraint ladder
//! - `error`: user-facing device error classification (`DeviceError`)
//! - `stream`: the live camera handle (`DeviceStream`)
//! - `negotiator`: ladder traversal and stream ownership (`DeviceNegotiator`)

mod backend;
mod constraints;
mod error;
mod negotiator;
mod stream;

pub use backend::{FrameDimensions, MediaBackend, MediaSource, PlatformError};
pub use constraints::{ConstraintDescriptor, FacingMode, default_ladder};
pub use error::DeviceError;
pub use negotiator::DeviceNegotiator;
pub use stream::DeviceStream;
