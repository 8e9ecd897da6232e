//! Capability descriptors for camera acquisition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which camera to prefer on devices that have several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing (selfie) camera
    User,
    /// Rear camera
    Environment,
}

/// One rung of the constraint ladder.
///
/// Every field is a preference; an empty descriptor asks for any camera.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_mode: Option<FacingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_height: Option<u32>,
}

impl ConstraintDescriptor {
    /// The bare request: any available camera, no resolution preference.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn facing(mut self, mode: FacingMode) -> Self {
        self.facing_mode = Some(mode);
        self
    }

    pub fn ideal_resolution(mut self, width: u32, height: u32) -> Self {
        self.ideal_width = Some(width);
        self.ideal_height = Some(height);
        self
    }

    pub fn ideal_width(mut self, width: u32) -> Self {
        self.ideal_width = Some(width);
        self
    }

    pub fn is_bare(&self) -> bool {
        self == &Self::any()
    }
}

impl fmt::Display for ConstraintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str("any camera");
        }
        let mut parts = Vec::new();
        if let Some(mode) = self.facing_mode {
            parts.push(match mode {
                FacingMode::User => "facing=user".to_string(),
                FacingMode::Environment => "facing=environment".to_string(),
            });
        }
        match (self.ideal_width, self.ideal_height) {
            (Some(w), Some(h)) => parts.push(format!("ideal={w}x{h}")),
            (Some(w), None) => parts.push(format!("ideal_width={w}")),
            (None, Some(h)) => parts.push(format!("ideal_height={h}")),
            (None, None) => {}
        }
        f.write_str(&parts.join(" "))
    }
}

/// Default ladder, most capable request first.
pub fn default_ladder() -> Vec<ConstraintDescriptor> {
    vec![
        ConstraintDescriptor::any()
            .facing(FacingMode::User)
            .ideal_resolution(1280, 720),
        ConstraintDescriptor::any().facing(FacingMode::User),
        ConstraintDescriptor::any().ideal_width(640),
        ConstraintDescriptor::any(),
    ]
}
