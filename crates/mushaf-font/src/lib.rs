//! mushaf-font: font face management for the mushaf layout engine.
//!
//! - loading TTF/OTF data and exposing metrics in font design units
//! - scaling glyph outlines (unscaled, design-unit paths)
//! - process-lifetime caches for faces and outlines

pub mod cache;
pub mod face;
pub mod metrics;
pub mod outline;

pub use cache::{FontCache, FontKey, OutlineCache};
pub use face::FontFace;
pub use metrics::{FontMetrics, ScaledFontMetrics};
pub use outline::{GlyphOutline, PathCommand};

use thiserror::Error;

/// Errors that can occur while working with fonts.
///
/// Missing or unreadable font data is a configuration error: callers are
/// expected to fail fast at initialization rather than continue without
/// a usable face.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid font data")]
    InvalidFont,
}

/// Convenient result alias for font-related operations.
pub type Result<T> = std::result::Result<T, FontError>;
