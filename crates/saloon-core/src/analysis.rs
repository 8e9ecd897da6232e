//! Face/style assessment returned by the analysis gateway.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Face shape reported when the analysis gateway could not be used.
pub const FALLBACK_FACE_SHAPE: &str = "Oval";

/// Immutable result of analysing one captured photo.
///
/// `recommendations` keeps the order chosen by the analyser (best first);
/// `features` is a set of descriptive tags with no meaningful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    face_shape: String,
    recommendations: Vec<String>,
    features: BTreeSet<String>,
}

impl AnalysisResult {
    pub fn new<R, F>(face_shape: impl Into<String>, recommendations: R, features: F) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            face_shape: face_shape.into(),
            recommendations: recommendations.into_iter().map(Into::into).collect(),
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Deterministic, neutral result substituted when analysis fails, so
    /// style selection can continue without a real assessment.
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_FACE_SHAPE,
            ["Textured Fringe", "Classic Side Part"],
            ["Standard Symmetry", "Clean Hairline"],
        )
    }

    pub fn face_shape(&self) -> &str {
        &self.face_shape
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn features(&self) -> &BTreeSet<String> {
        &self.features
    }

    /// Whether `style_name` is among the recommendations (case-insensitive).
    pub fn recommends(&self, style_name: &str) -> bool {
        self.recommendations
            .iter()
            .any(|r| r.eq_ignore_ascii_case(style_name))
    }
}
