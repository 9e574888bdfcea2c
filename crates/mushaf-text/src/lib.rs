//! mushaf-text: Arabic line segmentation, shaping, calligraphic
//! justification, and tajweed classification.
//!
//! The pipeline per line is segment → justify → (re-shape in
//! mushaf-layout). Tajweed classification runs independently over a
//! whole page's text and feeds coloring downstream.

pub mod arabic;
pub mod justify;
pub mod segment;
pub mod shaping;
pub mod tajweed;

pub use justify::{JustStyle, JustificationPlan, MushafVariant, justify};
pub use segment::{Line, LineTextInfo, LineType, SegmentCache, SpaceKind, Subword, WordInfo, segment};
pub use shaping::{LineShaper, ShapeText, ShapedGlyph, ShaperFeature};
pub use tajweed::{ColorClass, TajweedMap, classify};

use thiserror::Error;

/// Errors surfaced by text-stage entry points.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("font data is not usable for shaping")]
    UnusableFont,
}
