//! mushaf: page-accurate Quranic text layout.
//!
//! Facade over the engine crates:
//! - [`mushaf_text`]: segmentation, shaping, justification, tajweed
//! - [`mushaf_layout`]: positioning, draw lists, mark placement
//! - [`mushaf_view`]: progressive rendering, page cache, viewer
//! - [`mushaf_font`]: font faces and outline caches
//! - [`mushaf_config`]: TOML + environment configuration
//!
//! [`PageComposer`] wires the per-line pipeline (segment → justify →
//! position) for whole pages and owns the shared caches.

mod composer;

pub use composer::{ComposeError, PageComposer, ViewerRenderer};

pub use mushaf_config::{MushafConfig, VariantConfig};
pub use mushaf_font::{FontCache, FontFace, GlyphOutline, OutlineCache, PathCommand};
pub use mushaf_layout::{LineLayout, MarkSolver, PositionedGlyph, WordBounds};
pub use mushaf_text::justify::{JustStyle, JustificationPlan, MushafVariant};
pub use mushaf_text::segment::{Line, LineType, SpaceKind};
pub use mushaf_text::shaping::{LineShaper, ShapeText};
pub use mushaf_text::tajweed::{ColorClass, TajweedMap};
pub use mushaf_view::{PageCache, PageView, RenderingState, Viewer, ViewportMetrics};

use anyhow::Context;

/// Build a composer from `mushaf.toml` + environment, with readable
/// failure context for application startup.
pub fn composer_from_default_config() -> anyhow::Result<PageComposer> {
    let config = MushafConfig::load();
    PageComposer::from_config(&config).context("initializing mushaf page composer")
}
