use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use mushaf_config::{MushafConfig, VariantConfig};
use mushaf_font::{FontError, FontFace, OutlineCache};
use mushaf_layout::line::{CachedOutlines, LineRenderInput, render_line};
use mushaf_layout::{LayoutError, LineLayout};
use mushaf_text::TextError;
use mushaf_text::justify::{JustStyle, MushafVariant, justify};
use mushaf_text::segment::{Line, LineType, SegmentCache};
use mushaf_text::shaping::LineShaper;
use mushaf_text::tajweed::{TajweedMap, classify};
use mushaf_view::{RenderPage, ViewError};

/// Facade-level failures. Configuration problems (missing font) fail
/// fast at construction; out-of-range requests fail fast per call.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("no font configured: set layout.font in mushaf.toml or MUSHAF_FONT")]
    MissingFont,
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Owns the shaping resource and the shared caches, and runs the
/// per-line pipeline for whole pages.
///
/// The shaper is an explicit constructed resource: load once, share
/// read-only, dispose with the composer. Nothing here is global.
#[derive(Debug)]
pub struct PageComposer {
    face: Arc<FontFace>,
    shaper: LineShaper,
    outlines: OutlineCache,
    segments: SegmentCache,
    /// Per-page tajweed maps; lifetime = until text or ruleset changes
    /// (an explicit cache clear).
    tajweed_cache: HashMap<usize, Arc<Vec<TajweedMap>>>,
    variant: MushafVariant,
    style: JustStyle,
    line_width: f32,
    space_width: f32,
    tajweed_enabled: bool,
}

impl PageComposer {
    /// Build from configuration, loading the font from disk. Fails
    /// fast when no usable font is configured.
    pub fn from_config(config: &MushafConfig) -> Result<Self, ComposeError> {
        let path = config.layout.font.as_ref().ok_or(ComposeError::MissingFont)?;
        let face = Arc::new(FontFace::from_path(path, 0)?);
        Self::with_face(face, config)
    }

    /// Build around an already loaded face.
    pub fn with_face(face: Arc<FontFace>, config: &MushafConfig) -> Result<Self, ComposeError> {
        let shaper = LineShaper::new(&face)?;
        let variant = match config.layout.variant {
            VariantConfig::Madinah => MushafVariant::Madinah,
            VariantConfig::Indopak => MushafVariant::IndoPak,
        };
        let style = if config.layout.scale_only {
            JustStyle::ScaleOnly
        } else {
            JustStyle::Stretch
        };
        info!(?variant, "mushaf composer ready");
        Ok(Self {
            face,
            shaper,
            outlines: OutlineCache::new(),
            segments: SegmentCache::new(),
            tajweed_cache: HashMap::new(),
            variant,
            style,
            line_width: config.layout.line_width,
            space_width: config.layout.space_width,
            tajweed_enabled: config.tajweed.enabled,
        })
    }

    pub fn variant(&self) -> MushafVariant {
        self.variant
    }

    /// Tajweed maps for one page of lines, bypassing the cache.
    pub fn tajweed_maps(&self, lines: &[Line]) -> Vec<TajweedMap> {
        classify(lines, self.variant == MushafVariant::IndoPak)
    }

    fn page_tajweed(&mut self, page: usize, lines: &[Line]) -> Option<Arc<Vec<TajweedMap>>> {
        if !self.tajweed_enabled {
            return None;
        }
        let indopak = self.variant == MushafVariant::IndoPak;
        Some(
            self.tajweed_cache
                .entry(page)
                .or_insert_with(|| Arc::new(classify(lines, indopak)))
                .clone(),
        )
    }

    /// Compose every line of `pages[page]` into draw lists.
    ///
    /// Out-of-range page indices are an error, never clamped.
    pub fn compose_page(
        &mut self,
        pages: &[Vec<Line>],
        page: usize,
    ) -> Result<Vec<LineLayout>, ComposeError> {
        let lines = pages.get(page).ok_or(LayoutError::PageOutOfRange {
            page,
            pages: pages.len(),
        })?;
        let tajweed = self.page_tajweed(page, lines);

        let mut layouts = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            let map = tajweed.as_ref().and_then(|maps| maps.get(index));
            layouts.push(self.compose_line_inner(page, index, line, map));
        }
        Ok(layouts)
    }

    /// Compose a single line of a page. Both indices are bounds
    /// checked.
    pub fn compose_line(
        &mut self,
        pages: &[Vec<Line>],
        page: usize,
        line: usize,
    ) -> Result<LineLayout, ComposeError> {
        let lines = pages.get(page).ok_or(LayoutError::PageOutOfRange {
            page,
            pages: pages.len(),
        })?;
        let entry = lines.get(line).ok_or(LayoutError::LineOutOfRange {
            line,
            lines: lines.len(),
        })?;
        let tajweed = self.page_tajweed(page, lines);
        let map = tajweed.as_ref().and_then(|maps| maps.get(line));
        Ok(self.compose_line_inner(page, line, entry, map))
    }

    fn compose_line_inner(
        &mut self,
        page: usize,
        index: usize,
        line: &Line,
        tajweed: Option<&TajweedMap>,
    ) -> LineLayout {
        let info = self.segments.get_or_segment(page, index, line);
        let desired = self.line_width * line.width_ratio;
        // Headers and basmala lines center by scaling; kashida is for
        // content lines.
        let style = match line.line_type {
            LineType::Content => self.style,
            _ => JustStyle::ScaleOnly,
        };
        let plan = justify(
            &self.shaper,
            &info,
            desired,
            self.space_width,
            self.variant,
            style,
        );
        debug!(
            page,
            line = index,
            achieved = plan.achieved_width,
            desired = plan.desired_width,
            "composed line"
        );
        let mut outlines = CachedOutlines {
            face: &self.face,
            cache: &mut self.outlines,
        };
        render_line(
            &self.shaper,
            &mut outlines,
            &LineRenderInput {
                line,
                info: &info,
                plan: &plan,
                tajweed,
                variant: self.variant,
                track_words: true,
            },
        )
    }

    /// Drop every cached outline, segmentation, and tajweed map. Must
    /// accompany any font or layout-affecting configuration change;
    /// pair with clearing the page cache on the view side.
    pub fn clear_caches(&mut self) {
        info!("clearing outline, segmentation, and tajweed caches");
        self.outlines.clear();
        self.segments.clear();
        self.tajweed_cache.clear();
    }
}

/// Adapter driving [`PageComposer`] from the progressive scheduler:
/// the viewer decides *when* lines render, this renders them and
/// collects the results.
pub struct ViewerRenderer<'a> {
    composer: &'a mut PageComposer,
    pages: &'a [Vec<Line>],
    /// Collected layouts as ((page, line), layout).
    rendered: Vec<((usize, usize), LineLayout)>,
}

impl<'a> ViewerRenderer<'a> {
    pub fn new(composer: &'a mut PageComposer, pages: &'a [Vec<Line>]) -> Self {
        Self {
            composer,
            pages,
            rendered: Vec::new(),
        }
    }

    pub fn take_rendered(&mut self) -> Vec<((usize, usize), LineLayout)> {
        std::mem::take(&mut self.rendered)
    }
}

impl RenderPage for ViewerRenderer<'_> {
    fn line_count(&self, page: usize) -> usize {
        self.pages.get(page).map_or(0, Vec::len)
    }

    fn render_line(&mut self, page: usize, line: usize) -> Result<(), ViewError> {
        let layout = self
            .composer
            .compose_line(self.pages, page, line)
            .map_err(|e| ViewError::Render {
                page,
                line,
                message: e.to_string(),
            })?;
        self.rendered.push(((page, line), layout));
        Ok(())
    }
}
