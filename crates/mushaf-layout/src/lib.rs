//! mushaf-layout: glyph positioning, bounds, draw lists, diacritic
//! placement, and the precomputed-layout path.
//!
//! Consumes segmentation + justification results from `mushaf-text`
//! and produces backend-agnostic draw lists. Presentation backends own
//! rasterization and the em-space Y flip.

pub mod draw_list;
pub mod line;
pub mod marks;
pub mod precomputed;

pub use draw_list::{LineLayout, PositionedGlyph, WordBounds};
pub use line::{CachedOutlines, LineRenderInput, OutlineSource, render_line};
pub use marks::{ForceNode, MarkSolver};
pub use precomputed::{LayoutDocument, compose_page};

use thiserror::Error;

/// Errors surfaced by layout entry points.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Out-of-range requests fail fast; they are never clamped.
    #[error("page {page} out of range (document has {pages} pages)")]
    PageOutOfRange { page: usize, pages: usize },
    #[error("line {line} out of range ({lines} lines on page)")]
    LineOutOfRange { line: usize, lines: usize },
    #[error("malformed layout document: {0}")]
    Document(String),
}
