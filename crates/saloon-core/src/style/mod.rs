//! Hairstyle catalog.
//!
//! The catalog is a read-only, ordered list of [`Hairstyle`] entries supplied
//! once at startup. The orchestrator only reads entries from it.
//!
//! - `builtin`: the catalog shipped with the application

mod builtin;

pub use builtin::builtin_catalog;

use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hairstyle {
    /// Stable identifier used for selection and export file names
    pub id: String,
    /// Display name (matches the names used in analysis recommendations)
    pub name: String,
    /// Short human-readable description
    pub description: String,
    /// Iconographic hint for front ends
    pub icon: String,
    /// Instruction sent to the synthesis gateway
    pub directive: String,
}

impl Hairstyle {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        directive: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            directive: directive.into(),
        }
    }
}

/// Ordered, immutable collection of hairstyles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCatalog {
    styles: Vec<Hairstyle>,
}

impl StyleCatalog {
    pub fn new(styles: Vec<Hairstyle>) -> Self {
        Self { styles }
    }

    /// Looks up a style by its identifier.
    pub fn get(&self, id: &str) -> Option<&Hairstyle> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Looks up a style by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Hairstyle> {
        self.styles
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hairstyle> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
