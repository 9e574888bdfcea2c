use std::sync::Arc;

use harfrust::{
    BufferClusterLevel, Direction as HbDirection, Feature as HbFeature, FontRef as HbFontRef,
    Script as HbScript, ShaperData, ShaperInstance, Tag as HbTag, UnicodeBuffer as HbUnicodeBuffer,
};

use mushaf_font::FontFace;

use crate::TextError;
use crate::shaping::features::OPEN_END;

/// A single shaped glyph. Advances and offsets are in font design units;
/// `cluster` is the char index of the source character within the
/// shaped text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    pub glyph_id: u32,
    pub cluster: u32,
    pub x_advance: f32,
    pub y_advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

/// A feature activation handed to the shaper. `start`/`end` are char
/// indices; [`OPEN_END`](crate::shaping::OPEN_END) means "rest of text".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaperFeature {
    pub tag: [u8; 4],
    pub value: u32,
    pub start: usize,
    pub end: usize,
}

/// The shaping boundary: text + features in, positioned glyphs out.
///
/// The production implementation is [`LineShaper`]; tests substitute
/// deterministic fakes.
pub trait ShapeText {
    fn shape(&self, text: &str, features: &[ShaperFeature]) -> Vec<ShapedGlyph>;

    /// Total advance width of `text` under `features`.
    fn measure(&self, text: &str, features: &[ShaperFeature]) -> f32 {
        self.shape(text, features)
            .iter()
            .map(|g| g.x_advance)
            .sum()
    }
}

/// Arabic line shaper built on harfrust (pure-Rust HarfBuzz).
///
/// Always shapes right-to-left `arab`/`ar` with character-granular
/// clusters, because feature ranges are applied at character, not
/// glyph, granularity. Holds only the font bytes; the harfrust views
/// are rebuilt per call, which keeps the shaper `Send` and free of
/// self-references.
#[derive(Debug)]
pub struct LineShaper {
    data: Arc<[u8]>,
    index: u32,
}

impl LineShaper {
    /// Wrap a loaded face. Fails fast if harfrust cannot read the data,
    /// so later shape calls cannot silently no-op.
    pub fn new(face: &FontFace) -> Result<Self, TextError> {
        let data = face.data();
        let index = face.index();
        HbFontRef::from_index(&data, index).map_err(|_| TextError::UnusableFont)?;
        Ok(Self { data, index })
    }

    fn font_ref(&self) -> HbFontRef<'_> {
        // Validated in `new`; the same bytes cannot stop parsing later.
        HbFontRef::from_index(&self.data, self.index).expect("font validated at construction")
    }
}

impl ShapeText for LineShaper {
    fn shape(&self, text: &str, features: &[ShaperFeature]) -> Vec<ShapedGlyph> {
        let font_ref = self.font_ref();
        let shaper_data = ShaperData::new(&font_ref);
        let instance =
            ShaperInstance::from_variations(&font_ref, core::iter::empty::<harfrust::Variation>());
        let shaper = shaper_data
            .shaper(&font_ref)
            .instance(Some(&instance))
            .point_size(None)
            .build();

        // Char index -> byte offset, and byte offset -> char index, for
        // translating feature ranges in and cluster values out.
        let char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let mut byte_to_char = vec![0u32; text.len() + 1];
        for (char_idx, &byte) in char_to_byte.iter().enumerate() {
            byte_to_char[byte] = char_idx as u32;
        }

        let mut buffer = HbUnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(HbDirection::RightToLeft);
        if let Some(script) = HbScript::from_iso15924_tag(HbTag::new(b"arab")) {
            buffer.set_script(script);
        }
        if let Ok(lang) = "ar".parse() {
            buffer.set_language(lang);
        }
        // Keep clusters at character granularity; merged clusters would
        // make the char-addressed feature ranges meaningless.
        buffer.set_cluster_level(BufferClusterLevel::MonotoneCharacters);

        let hb_features: Vec<HbFeature> = features
            .iter()
            .map(|f| {
                let tag = HbTag::new(&f.tag);
                let start = char_to_byte.get(f.start).copied().unwrap_or(text.len());
                if f.end == OPEN_END {
                    HbFeature::new(tag, f.value, start..)
                } else {
                    let end = char_to_byte.get(f.end).copied().unwrap_or(text.len());
                    HbFeature::new(tag, f.value, start..end)
                }
            })
            .collect();

        let glyph_buffer = shaper.shape(buffer, &hb_features);
        let infos = glyph_buffer.glyph_infos();
        let positions = glyph_buffer.glyph_positions();

        infos
            .iter()
            .zip(positions.iter())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id,
                cluster: byte_to_char[info.cluster as usize],
                x_advance: pos.x_advance as f32,
                y_advance: pos.y_advance as f32,
                x_offset: pos.x_offset as f32,
                y_offset: pos.y_offset as f32,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-advance fake used to exercise the trait surface.
    struct FixedShaper;

    impl ShapeText for FixedShaper {
        fn shape(&self, text: &str, _features: &[ShaperFeature]) -> Vec<ShapedGlyph> {
            text.chars()
                .enumerate()
                .map(|(i, _)| ShapedGlyph {
                    glyph_id: i as u32 + 1,
                    cluster: i as u32,
                    x_advance: 100.0,
                    y_advance: 0.0,
                    x_offset: 0.0,
                    y_offset: 0.0,
                })
                .collect()
        }
    }

    #[test]
    fn measure_sums_advances() {
        let shaper = FixedShaper;
        assert_eq!(shaper.measure("بسم", &[]), 300.0);
    }
}
