use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap;
use swash::GlyphId;

use crate::face::FontFace;
use crate::outline::GlyphOutline;
use crate::Result;

/// Key for identifying a font within the cache.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    /// Path to the font file on disk.
    pub path: PathBuf,
    /// Font index within the file (for collections).
    pub index: u32,
}

impl FontKey {
    pub fn new(path: impl AsRef<Path>, index: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            index: index as u32,
        }
    }
}

/// Simple in-memory font cache keyed by file path and index.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<FontKey, Arc<FontFace>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    /// Get a font face from the cache or load it from disk.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>, index: usize) -> Result<Arc<FontFace>> {
        let key = FontKey::new(&path, index);
        if let Some(face) = self.fonts.get(&key) {
            return Ok(face.clone());
        }

        let face = Arc::new(FontFace::from_path(&key.path, index)?);
        self.fonts.insert(key, face.clone());
        Ok(face)
    }

    /// Insert an already constructed font face with an explicit key.
    pub fn insert(&mut self, key: FontKey, face: Arc<FontFace>) {
        self.fonts.insert(key, face);
    }

    /// Retrieve a font by key if it exists.
    pub fn get(&self, key: &FontKey) -> Option<Arc<FontFace>> {
        self.fonts.get(key).cloned()
    }
}

/// Per-glyph-id outline cache.
///
/// Outline extraction walks the glyf/CFF tables each time, so every
/// rendered line would otherwise re-pay that cost per glyph. Lives for
/// the process unless explicitly cleared; must be cleared together with
/// the page cache when the font or layout-affecting configuration
/// changes.
#[derive(Debug, Default)]
pub struct OutlineCache {
    outlines: HashMap<GlyphId, Option<Arc<GlyphOutline>>>,
}

impl OutlineCache {
    pub fn new() -> Self {
        Self {
            outlines: HashMap::new(),
        }
    }

    /// Fetch the outline for `glyph_id`, scaling and memoizing on first
    /// use. Glyphs with no outline (e.g. spaces) memoize as `None`.
    pub fn get_or_scale(&mut self, face: &FontFace, glyph_id: GlyphId) -> Option<Arc<GlyphOutline>> {
        self.outlines
            .entry(glyph_id)
            .or_insert_with(|| face.glyph_outline(glyph_id).map(Arc::new))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn clear(&mut self) {
        self.outlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_fails_fast() {
        let mut cache = FontCache::new();
        let result = cache.get_or_load("/nonexistent/mushaf.ttf", 0);
        assert!(result.is_err());
    }

    #[test]
    fn outline_cache_clear_resets() {
        let mut cache = OutlineCache::new();
        assert!(cache.is_empty());
        cache.outlines.insert(42, None);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
