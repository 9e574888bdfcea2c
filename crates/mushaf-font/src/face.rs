use std::sync::Arc;

use swash::scale::ScaleContext;
use swash::{FontRef, GlyphId, Metrics};

use crate::outline::GlyphOutline;
use crate::{FontError, FontMetrics, Result};

/// Loaded font face backed by a font file (TTF/OTF).
///
/// Thin wrapper around `swash::FontRef` that owns the underlying font
/// data and exposes metrics and glyph outlines in font design units.
/// Shared read-only after construction; shaping components borrow the
/// data through [`FontFace::data`].
#[derive(Debug, Clone)]
pub struct FontFace {
    /// Full font data.
    data: Arc<[u8]>,
    /// Offset to the table directory for this font.
    offset: u32,
    /// Cache key used internally by swash.
    key: swash::CacheKey,
    /// Extracted font metrics in font units.
    metrics: FontMetrics,
    /// Index of the font within the file (for collections).
    index: u32,
}

impl FontFace {
    /// Create a font face from raw bytes and a font index within the file.
    pub fn from_bytes(data: Arc<[u8]>, index: usize) -> Result<Self> {
        let font = FontRef::from_index(&data, index).ok_or(FontError::InvalidFont)?;
        let metrics = Self::metrics_from_swash(&font);
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            metrics,
            index: index as u32,
        })
    }

    /// Create a font face from raw bytes owned by a `Vec<u8>`.
    pub fn from_vec(data: Vec<u8>, index: usize) -> Result<Self> {
        Self::from_bytes(Arc::from(data), index)
    }

    /// Create a font face from a font file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>, index: usize) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, index)
    }

    /// Expose the raw font bytes for integration with the shaper, which
    /// builds its own view over the same data.
    pub fn data(&self) -> Arc<[u8]> {
        self.data.clone()
    }

    /// Index of this face within its font file.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Return a transient `FontRef` for interacting with swash APIs.
    fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    fn metrics_from_swash(font: &FontRef<'_>) -> FontMetrics {
        // Default (no variation) coordinates.
        let Metrics {
            units_per_em,
            ascent,
            descent,
            leading,
            ..
        } = font.metrics(&[]);

        FontMetrics {
            ascent,
            descent,
            line_gap: leading,
            units_per_em,
        }
    }

    /// Font metrics in font units.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Extract a glyph outline in font design units.
    ///
    /// A size of zero asks swash for the unscaled outline, which keeps
    /// every coordinate in the same unit space the shaper reports
    /// advances in.
    pub fn glyph_outline(&self, glyph_id: GlyphId) -> Option<GlyphOutline> {
        let mut context = ScaleContext::new();
        let font = self.as_swash_ref();
        let mut scaler = context.builder(font).size(0.0).build();
        scaler
            .scale_outline(glyph_id)
            .map(|outline| GlyphOutline::from_swash(&outline))
    }
}
