//! Glyph positioning & bounds coordinator.
//!
//! Re-shapes a full line with its committed justification features and
//! walks the shaped glyphs right-to-left, accumulating positions, word
//! bounds, and the line's vertical extent into a draw list.

use std::sync::Arc;

use mushaf_font::{FontFace, GlyphOutline, OutlineCache};
use mushaf_text::arabic;
use mushaf_text::justify::{JustificationPlan, MushafVariant};
use mushaf_text::segment::{Line, LineTextInfo, SpaceKind};
use mushaf_text::shaping::ShapeText;
use mushaf_text::tajweed::{ColorClass, TajweedMap};

use crate::draw_list::{LineLayout, PositionedGlyph, WordBounds};

/// Outline lookup boundary: glyph id in, shared outline out. `None`
/// means the glyph draws nothing (spaces, controls).
pub trait OutlineSource {
    fn outline(&mut self, glyph_id: u32) -> Option<Arc<GlyphOutline>>;
}

/// Production outline source: a face plus the process-wide outline
/// cache.
pub struct CachedOutlines<'a> {
    pub face: &'a FontFace,
    pub cache: &'a mut OutlineCache,
}

impl OutlineSource for CachedOutlines<'_> {
    fn outline(&mut self, glyph_id: u32) -> Option<Arc<GlyphOutline>> {
        self.cache.get_or_scale(self.face, glyph_id as u16)
    }
}

/// Everything `render_line` needs for one line.
pub struct LineRenderInput<'a> {
    pub line: &'a Line,
    pub info: &'a LineTextInfo,
    pub plan: &'a JustificationPlan,
    pub tajweed: Option<&'a TajweedMap>,
    pub variant: MushafVariant,
    /// When set, per-word x extents are collected for hit-testing.
    pub track_words: bool,
}

/// Re-shape and position one line.
///
/// The shaped glyph sequence arrives in visual order (leftmost first
/// for RTL text); walking it in reverse starts at the line's right
/// edge, which is where Arabic layout begins.
pub fn render_line(
    shaper: &dyn ShapeText,
    outlines: &mut dyn OutlineSource,
    input: &LineRenderInput,
) -> LineLayout {
    let features = input.plan.overrides.to_shaper_features();
    let glyphs = shaper.shape(&input.line.text, &features);
    let chars: Vec<char> = input.line.text.chars().collect();

    let advance_of = |glyph: &mushaf_text::shaping::ShapedGlyph| -> f32 {
        match input.info.space_kind_at(glyph.cluster as usize) {
            Some(SpaceKind::Simple) => input.plan.simple_space,
            Some(SpaceKind::AyaEnd) => input.plan.aya_space,
            None => glyph.x_advance,
        }
    };

    let width: f32 = glyphs.iter().map(advance_of).sum();

    let mut layout = LineLayout::new();
    layout.width = width;
    layout.x_scale = input.plan.x_scale;

    let mut y_min = f32::MAX;
    let mut y_max = f32::MIN;
    let mut word_bounds: Vec<Option<WordBounds>> = if input.track_words {
        vec![None; input.info.words.len()]
    } else {
        Vec::new()
    };

    let mut pen = width;
    for glyph in glyphs.iter().rev() {
        let advance = advance_of(glyph);
        pen -= advance;
        let cluster = glyph.cluster as usize;

        if input.info.space_kind_at(cluster).is_some() {
            // Spaces advance the cursor and leave no mark.
            continue;
        }

        let c = chars.get(cluster).copied().unwrap_or('\u{0}');
        let outline = outlines.outline(glyph.glyph_id).map(|outline| {
            if arabic::is_arabic_digit(c) || c == arabic::END_OF_AYAH {
                // Verse-end numerals embed their decorative frame as
                // leading sub-paths; the page decoration supplies its
                // own frame instead.
                Arc::new(outline.drop_leading_contours(input.variant.frame_contour_count()))
            } else {
                outline
            }
        });

        let x = pen + glyph.x_offset;
        let y = glyph.y_offset;

        if let Some(outline) = outline.as_deref() {
            if !outline.is_empty() {
                y_min = y_min.min(outline.y_min + y);
                y_max = y_max.max(outline.y_max + y);
            }
        }

        if input.track_words {
            if let Some(word) = input.info.word_at(cluster) {
                let bounds = word_bounds[word].get_or_insert(WordBounds {
                    start_x: x,
                    end_x: x + advance,
                });
                bounds.start_x = bounds.start_x.min(x);
                bounds.end_x = bounds.end_x.max(x + advance);
            }
        }

        layout.draw.push(PositionedGlyph {
            glyph_id: glyph.glyph_id,
            outline,
            x,
            y,
            color: color_for(input.tajweed, &chars, cluster),
        });
    }

    if y_min <= y_max {
        layout.y_min = y_min;
        layout.y_max = y_max;
    }
    layout.word_bounds = word_bounds.into_iter().flatten().collect();
    layout
}

/// Tajweed class for a cluster. Zero-width controls carry no class of
/// their own and inherit from the next visible cluster.
fn color_for(
    tajweed: Option<&TajweedMap>,
    chars: &[char],
    cluster: usize,
) -> Option<ColorClass> {
    let map = tajweed?;
    let c = chars.get(cluster).copied()?;
    if arabic::is_zero_width_control(c) {
        let mut i = cluster + 1;
        while i < chars.len() {
            if !arabic::is_zero_width_control(chars[i]) {
                return map.get(&i).copied();
            }
            i += 1;
        }
        return None;
    }
    map.get(&cluster).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mushaf_font::PathCommand;
    use mushaf_text::justify::{JustStyle, justify};
    use mushaf_text::segment::segment;
    use mushaf_text::shaping::{ShapedGlyph, ShaperFeature};
    use mushaf_text::tajweed::classify;

    const ADV: f32 = 100.0;
    const SPACE: f32 = 60.0;

    /// Visual-order fake: emits the line's glyphs leftmost-first, the
    /// way an RTL shaper does.
    struct VisualShaper;

    impl ShapeText for VisualShaper {
        fn shape(&self, text: &str, _features: &[ShaperFeature]) -> Vec<ShapedGlyph> {
            let count = text.chars().count();
            (0..count)
                .rev()
                .map(|i| ShapedGlyph {
                    glyph_id: 10 + i as u32,
                    cluster: i as u32,
                    x_advance: advance(text.chars().nth(i).unwrap()),
                    y_advance: 0.0,
                    x_offset: 0.0,
                    y_offset: 0.0,
                })
                .collect()
        }
    }

    fn advance(c: char) -> f32 {
        if c == ' ' {
            SPACE
        } else if arabic::is_diacritic(c) {
            0.0
        } else {
            ADV
        }
    }

    struct BoxOutlines;

    impl OutlineSource for BoxOutlines {
        fn outline(&mut self, _glyph_id: u32) -> Option<Arc<GlyphOutline>> {
            Some(Arc::new(GlyphOutline::new(vec![
                PathCommand::MoveTo { x: 0.0, y: -50.0 },
                PathCommand::LineTo { x: 80.0, y: -50.0 },
                PathCommand::LineTo { x: 80.0, y: 550.0 },
                PathCommand::LineTo { x: 0.0, y: 550.0 },
                PathCommand::Close,
            ])))
        }
    }

    fn render(text: &str, track_words: bool) -> LineLayout {
        let line = Line::content(text);
        let info = segment(&line);
        let natural = VisualShaper.measure(text, &[]);
        let plan = justify(
            &VisualShaper,
            &info,
            natural,
            SPACE,
            MushafVariant::Madinah,
            JustStyle::Stretch,
        );
        let maps = classify(std::slice::from_ref(&line), false);
        render_line(
            &VisualShaper,
            &mut BoxOutlines,
            &LineRenderInput {
                line: &line,
                info: &info,
                plan: &plan,
                tajweed: Some(&maps[0]),
                variant: MushafVariant::Madinah,
                track_words,
            },
        )
    }

    #[test]
    fn spaces_leave_no_glyphs_but_advance_the_cursor() {
        let layout = render("اب جد", false);
        assert_eq!(layout.draw.len(), 4);
        assert_eq!(layout.width, 4.0 * ADV + SPACE);
    }

    #[test]
    fn logical_first_glyph_sits_at_the_right_edge() {
        let layout = render("اب", false);
        // First drawn glyph is the logical first char (cluster 0),
        // placed rightmost.
        let first = &layout.draw[0];
        assert_eq!(first.glyph_id, 10);
        assert_eq!(first.x, ADV);
    }

    #[test]
    fn y_bounds_cover_outline_extent() {
        let layout = render("اب", false);
        assert_eq!(layout.y_min, -50.0);
        assert_eq!(layout.y_max, 550.0);
    }

    #[test]
    fn word_bounds_track_each_word() {
        let layout = render("اب جد", true);
        assert_eq!(layout.word_bounds.len(), 2);
        // Second word occupies the left end of the line.
        let second = layout.word_bounds[1];
        assert_eq!(second.start_x, 0.0);
        assert_eq!(second.end_x, 2.0 * ADV);
        let first = layout.word_bounds[0];
        assert_eq!(first.start_x, 2.0 * ADV + SPACE);
        assert_eq!(first.end_x, 4.0 * ADV + SPACE);
    }

    #[test]
    fn tajweed_classes_attach_by_cluster() {
        let layout = render("إِنَّ", false);
        // The noon (cluster 2) carries ghunnah.
        let noon = layout
            .draw
            .iter()
            .find(|g| g.glyph_id == 12)
            .expect("noon glyph present");
        assert_eq!(noon.color, Some(ColorClass::Ghunnah));
    }
}
