//! Justification scenarios against a deterministic fake shaper.
//!
//! The fake gives every base letter a fixed advance and widens a
//! character when a cv-feature targets it, which is enough to exercise
//! budget distribution, the stretch searches, and the width invariant
//! without font data.

use mushaf_text::justify::{self, JustStyle, MushafVariant, WIDTH_EPSILON};
use mushaf_text::segment::{Line, segment};
use mushaf_text::shaping::{ShapeText, ShapedGlyph, ShaperFeature, StretchFeature};

const LETTER_ADV: f32 = 100.0;
const SPACE_ADV: f32 = 60.0;
const KASHIDA_STEP: f32 = 30.0;
const CHAINED_STEP: f32 = 15.0;
const DIACRITIC_STEP: f32 = 5.0;

struct MockShaper;

impl ShapeText for MockShaper {
    fn shape(&self, text: &str, features: &[ShaperFeature]) -> Vec<ShapedGlyph> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let mut advance = base_advance(c);
                for f in features {
                    if f.start == i {
                        match &f.tag {
                            b"cv01" => advance += KASHIDA_STEP * f.value as f32,
                            b"cv02" => advance += CHAINED_STEP * f.value as f32,
                            b"cv03" => advance += DIACRITIC_STEP * f.value as f32,
                            _ => {}
                        }
                    }
                }
                ShapedGlyph {
                    glyph_id: c as u32,
                    cluster: i as u32,
                    x_advance: advance,
                    y_advance: 0.0,
                    x_offset: 0.0,
                    y_offset: 0.0,
                }
            })
            .collect()
    }
}

fn base_advance(c: char) -> f32 {
    if c == ' ' {
        SPACE_ADV
    } else if mushaf_text::arabic::is_diacritic(c) {
        0.0
    } else {
        LETTER_ADV
    }
}

fn natural_width(text: &str) -> f32 {
    MockShaper.measure(text, &[])
}

const BASMALA: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ";

#[test]
fn compression_scales_uniformly_without_features() {
    let line = Line::content(BASMALA);
    let info = segment(&line);
    let natural = natural_width(BASMALA);
    let plan = justify::justify(
        &MockShaper,
        &info,
        natural * 0.8,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    assert!((plan.x_scale - 0.8).abs() < 0.001);
    assert!(plan.overrides.is_empty());
    assert_eq!(plan.simple_space, SPACE_ADV);
}

#[test]
fn scale_only_style_never_stretches_spaces() {
    let line = Line::content(BASMALA);
    let info = segment(&line);
    let natural = natural_width(BASMALA);
    let plan = justify::justify(
        &MockShaper,
        &info,
        natural * 1.5,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::ScaleOnly,
    );
    assert!((plan.x_scale - 1.5).abs() < 0.001);
    assert!(plan.overrides.is_empty());
    assert_eq!(plan.simple_space, SPACE_ADV);
}

#[test]
fn basmala_ten_percent_stretch_scenario() {
    // Madinah variant, default style, desired 10% over natural: the
    // plan must widen spacing and/or carry a cv01 override, and land
    // within epsilon of the desired width.
    let line = Line::content(BASMALA);
    let info = segment(&line);
    let natural = natural_width(BASMALA);
    let desired = natural * 1.1;
    let plan = justify::justify(
        &MockShaper,
        &info,
        desired,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    let spacing_grew = plan.simple_space > SPACE_ADV || plan.aya_space > SPACE_ADV;
    let has_kashida = plan
        .overrides
        .iter()
        .any(|o| o.feature == StretchFeature::Kashida);
    assert!(spacing_grew || has_kashida);
    assert!((plan.achieved_width - desired).abs() <= WIDTH_EPSILON);
    assert!(plan.achieved_width <= desired + WIDTH_EPSILON);
}

#[test]
fn insufficient_space_budget_forces_the_search() {
    // One simple space; desired width far beyond the space-budget cap,
    // so the kashida search provably must contribute.
    let text = "بسم ملك";
    let line = Line::content(text);
    let info = segment(&line);
    let natural = natural_width(text);
    let desired = natural + 400.0;
    let plan = justify::justify(
        &MockShaper,
        &info,
        desired,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    assert!(
        plan.overrides
            .iter()
            .any(|o| o.feature == StretchFeature::Kashida),
        "space budget alone cannot close a 400-unit gap"
    );
    assert!(plan.achieved_width <= desired + WIDTH_EPSILON);
    assert!((plan.achieved_width - desired).abs() <= WIDTH_EPSILON);
}

#[test]
fn aya_spaces_stretch_twice_as_far_as_simple_spaces() {
    let text = "اب جد ١";
    let line = Line::content(text);
    let info = segment(&line);
    let natural = natural_width(text);
    let plan = justify::justify(
        &MockShaper,
        &info,
        natural + 150.0,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    let simple_extra = plan.simple_space - SPACE_ADV;
    let aya_extra = plan.aya_space - SPACE_ADV;
    assert!(simple_extra > 0.0);
    assert!((aya_extra - 2.0 * simple_extra).abs() < 0.001);
}

#[test]
fn spaceless_line_reports_underfill_instead_of_forcing() {
    // A single word with a 10-unit gap: the smallest committed edit
    // would overshoot, so the engine stops at natural width and the
    // caller sees the shortfall.
    let text = "بسم";
    let line = Line::content(text);
    let info = segment(&line);
    let natural = natural_width(text);
    let desired = natural + 10.0;
    let plan = justify::justify(
        &MockShaper,
        &info,
        desired,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    assert!(plan.overrides.is_empty());
    assert_eq!(plan.achieved_width, natural);
    assert!((plan.underfill() - 10.0).abs() < 0.001);
}

#[test]
fn indopak_search_starts_from_the_last_word() {
    let text = "بسم بسم";
    let line = Line::content(text);
    let info = segment(&line);
    let natural = natural_width(text);
    // Budget 100, residual 60: exactly one 45-unit commit fits, and it
    // must land in the trailing word.
    let plan = justify::justify(
        &MockShaper,
        &info,
        natural + 160.0,
        SPACE_ADV,
        MushafVariant::IndoPak,
        JustStyle::Stretch,
    );
    let last_word_start = info.words[1].start;
    assert!(plan.overrides.value_of(StretchFeature::Kashida, last_word_start) >= 1);
    assert_eq!(plan.overrides.value_of(StretchFeature::Kashida, 0), 0);
}

#[test]
fn width_invariant_holds_across_variants_and_styles() {
    let texts = [BASMALA, "بسم ملك", "قل هو ٱلله أحد ١", "يعلمون"];
    let variants = [MushafVariant::Madinah, MushafVariant::IndoPak];
    let styles = [JustStyle::Stretch, JustStyle::ScaleOnly];
    for text in texts {
        let line = Line::content(text);
        let info = segment(&line);
        let natural = natural_width(text);
        for variant in variants {
            for style in styles {
                for factor in [0.7, 0.95, 1.0, 1.05, 1.3, 2.5] {
                    let desired = natural * factor;
                    let plan =
                        justify::justify(&MockShaper, &info, desired, SPACE_ADV, variant, style);
                    assert!(
                        plan.achieved_width <= desired + WIDTH_EPSILON,
                        "overflow for {text:?} {variant:?} {style:?} x{factor}"
                    );
                }
            }
        }
    }
}

#[test]
fn committed_word_widths_never_shrink() {
    let text = "بسم ملك";
    let line = Line::content(text);
    let info = segment(&line);
    let natural = natural_width(text);
    let plan = justify::justify(
        &MockShaper,
        &info,
        natural + 300.0,
        SPACE_ADV,
        MushafVariant::Madinah,
        JustStyle::Stretch,
    );
    for (i, word) in info.words.iter().enumerate() {
        let base = MockShaper.measure(&word.text, &[]);
        assert!(plan.word_widths[i] >= base);
    }
}
