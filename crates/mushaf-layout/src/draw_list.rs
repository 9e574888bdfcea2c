//! Backend-agnostic draw list for one line.
//!
//! Coordinates are font design units with the line origin at the left
//! edge of the line box, baseline at y = 0, +Y up. Consumers rendering
//! to screen space apply the Y flip and the line's scale factors.

use std::sync::Arc;

use mushaf_font::GlyphOutline;
use mushaf_text::tajweed::ColorClass;

/// One resolved glyph ready to draw.
#[derive(Debug, Clone)]
pub struct PositionedGlyph {
    pub glyph_id: u32,
    /// Outline reference; `None` for glyphs with no visible marks.
    pub outline: Option<Arc<GlyphOutline>>,
    pub x: f32,
    pub y: f32,
    /// Recitation color class, when tajweed coloring is active.
    pub color: Option<ColorClass>,
}

/// Horizontal extent of one word, for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordBounds {
    pub start_x: f32,
    pub end_x: f32,
}

/// The complete layout of one rendered line.
#[derive(Debug, Clone, Default)]
pub struct LineLayout {
    pub draw: Vec<PositionedGlyph>,
    /// Per-word x extents, in word order. Empty unless word tracking
    /// was requested.
    pub word_bounds: Vec<WordBounds>,
    /// Vertical extent across all outlines, for centering the line.
    pub y_min: f32,
    pub y_max: f32,
    /// Total advance width (spaces included) before scaling.
    pub width: f32,
    pub x_scale: f32,
    pub y_scale: f32,
}

impl LineLayout {
    pub fn new() -> Self {
        Self {
            x_scale: 1.0,
            y_scale: 1.0,
            ..Self::default()
        }
    }
}
