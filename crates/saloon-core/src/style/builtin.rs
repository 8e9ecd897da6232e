//! Builtin hairstyles shipped with the application.
//!
//! They are loaded once at startup and cached for the lifetime of the process.

use super::{Hairstyle, StyleCatalog};
use std::sync::OnceLock;

/// Static storage for the builtin catalog (initialized once).
static BUILTIN_CATALOG: OnceLock<StyleCatalog> = OnceLock::new();

/// Returns the builtin hairstyle catalog.
pub fn builtin_catalog() -> &'static StyleCatalog {
    BUILTIN_CATALOG.get_or_init(|| {
        StyleCatalog::new(vec![
            Hairstyle::new(
                "fringe",
                "Textured Fringe",
                "Choppy layers brushed forward onto the forehead",
                "✂️",
                "a textured fringe with short, choppy layers falling forward onto the forehead",
            ),
            Hairstyle::new(
                "side-part",
                "Classic Side Part",
                "Clean, combed side part with tapered sides",
                "💼",
                "a classic side part, neatly combed with a low taper on the sides",
            ),
            Hairstyle::new(
                "undercut",
                "Modern Undercut",
                "Long on top, shaved short around the sides",
                "⚡",
                "a modern undercut with longer hair slicked back on top and closely shaved sides",
            ),
            Hairstyle::new(
                "quiff",
                "Pompadour Quiff",
                "High volume swept up and back at the front",
                "🌊",
                "a voluminous pompadour quiff swept up and back from the forehead",
            ),
            Hairstyle::new(
                "buzz",
                "Buzz Cut",
                "Uniform, very short clipper cut",
                "🪒",
                "an even, very short buzz cut",
            ),
            Hairstyle::new(
                "curls",
                "Natural Curls",
                "Defined curls with a soft taper",
                "🌀",
                "natural, well-defined medium-length curls with a soft tapered fade",
            ),
            Hairstyle::new(
                "bob",
                "Sleek Bob",
                "Chin-length bob with a glossy finish",
                "💇",
                "a sleek chin-length bob with a straight, glossy finish",
            ),
            Hairstyle::new(
                "long-layers",
                "Long Layers",
                "Flowing shoulder-length layers",
                "🍃",
                "long flowing layers past the shoulders with face-framing pieces",
            ),
        ])
    })
}
