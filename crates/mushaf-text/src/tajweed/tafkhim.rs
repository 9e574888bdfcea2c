//! Tafkhim pass: heavy/light pronunciation, qalqalah, and silent
//! letters.
//!
//! Rule order is alternation order from the source convention; several
//! rules finish their classification with in-code context checks that a
//! pattern alone cannot express (ra tafkhim in particular).

use crate::arabic;

use super::ColorClass;
use super::buffer::ClassSink;
use super::patterns::{Cc, Rule, RuleCtx};

fn is_alef_or_wasla(c: char) -> bool {
    c == arabic::ALEF || c == arabic::ALEF_WASLA
}

fn is_kasra_class(c: char) -> bool {
    c == arabic::KASRA || c == arabic::KASRATAN
}

/// Shared tail for the two lam rules: the assimilating letter after a
/// silent lam keeps its own tafkhim.
fn classify_sun_letter(ctx: &RuleCtx, sink: &mut ClassSink, index: usize) {
    let Some(&c) = ctx.buf.get(index) else { return };
    if arabic::is_heavy_letter(c) {
        sink.set(index, ColorClass::HeavyLetter);
    } else if c == arabic::REH {
        classify_ra(ctx, sink, index);
    }
}

/// Ra takes tafkhim with fatha/damma (or their tanween), tarqiq with
/// kasra; with sukun it inherits from the preceding vowel.
fn classify_ra(ctx: &RuleCtx, sink: &mut ClassSink, index: usize) {
    let next = ctx.buf.get(index + 1).copied();
    match next {
        Some(c) if c == arabic::FATHA
            || c == arabic::DAMMA
            || c == arabic::FATHATAN
            || c == arabic::DAMMATAN =>
        {
            sink.set(index, ColorClass::HeavyLetter);
        }
        Some(arabic::SHADDA) => {
            // Doubled ra takes the quality of the vowel on the shadda.
            if !matches!(ctx.buf.get(index + 2), Some(&c) if is_kasra_class(c)) {
                sink.set(index, ColorClass::HeavyLetter);
            }
        }
        Some(c) if is_kasra_class(c) => {}
        _ => {
            // Sukun or unmarked: look back past the letter's carrier.
            let heavy = !matches!(ctx.prev_vowel_before(index), Some(v) if is_kasra_class(v));
            if heavy {
                sink.set(index, ColorClass::HeavyLetter);
            }
        }
    }
}

impl RuleCtx<'_> {
    /// Nearest short vowel/tanween strictly before `index`, looking
    /// back at most one syllable.
    fn prev_vowel_before(&self, index: usize) -> Option<char> {
        self.buf[..index]
            .iter()
            .rev()
            .take(3)
            .copied()
            .find(|&c| arabic::is_short_vowel(c) || arabic::is_tanween(c))
    }

    /// True when the boundary captured at `element` sits at a verse
    /// end: the next visible character is a verse digit or the
    /// end-of-ayah sign.
    pub(super) fn boundary_is_aya_end(&self, element: usize) -> bool {
        self.buf[self.at[element]..]
            .iter()
            .copied()
            .find(|&c| c != ' ')
            .is_some_and(|c| arabic::is_arabic_digit(c) || c == arabic::END_OF_AYAH)
    }
}

pub fn rules() -> Vec<Rule> {
    vec![
        // Lam of the divine name after fatha/damma is heavy; after
        // kasra the whole name reads light.
        Rule {
            name: "lam_jalala",
            pattern: vec![
                Cc::Pred(is_alef_or_wasla),
                Cc::Char(arabic::LAM),
                Cc::Char(arabic::LAM),
                Cc::Marks,
                Cc::Char(arabic::HEH),
            ],
            guard: Some(|ctx| {
                !matches!(ctx.prev_nonspace(ctx.at[0]), Some(c) if is_kasra_class(c))
            }),
            apply: |ctx, sink| {
                if ctx.at[0] > 0 && ctx.char_at(0) == Some(arabic::ALEF_WASLA) {
                    sink.set(ctx.at[0], ColorClass::Silent);
                }
                sink.set(ctx.at[1], ColorClass::HeavyLetter);
                sink.set(ctx.at[2], ColorClass::HeavyLetter);
            },
        },
        // Definite-article lam assimilated into a sun letter.
        Rule {
            name: "silent_lam_shamsiyya",
            pattern: vec![
                Cc::Pred(is_alef_or_wasla),
                Cc::Char(arabic::LAM),
                Cc::Pred(arabic::is_base_letter),
                Cc::Char(arabic::SHADDA),
            ],
            guard: None,
            apply: |ctx, sink| {
                if ctx.at[0] > 0 && ctx.char_at(0) == Some(arabic::ALEF_WASLA) {
                    sink.set(ctx.at[0], ColorClass::Silent);
                }
                sink.set(ctx.at[1], ColorClass::Silent);
                classify_sun_letter(ctx, sink, ctx.at[2]);
            },
        },
        // Hamzat wasl is only voiced when the recitation starts on it.
        Rule {
            name: "silent_wasla",
            pattern: vec![Cc::Char(arabic::ALEF_WASLA)],
            guard: Some(|ctx| ctx.at[0] > 0),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Silent),
        },
        // Small high round zero marks a written-but-unpronounced letter.
        Rule {
            name: "silent_marker",
            pattern: vec![
                Cc::Pred(arabic::is_base_letter),
                Cc::Char(arabic::SMALL_HIGH_ROUND_ZERO),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Silent),
        },
        Rule {
            name: "qalqalah_sukun",
            pattern: vec![
                Cc::Pred(arabic::is_qalqalah_letter),
                Cc::Pred(arabic::is_sukun),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Qalqalah),
        },
        // Qalqalah kubra: a qalqalah letter carried into a verse-end
        // pause, whatever mark it wears.
        Rule {
            name: "qalqalah_final",
            pattern: vec![
                Cc::Pred(arabic::is_qalqalah_letter),
                Cc::Marks,
                Cc::Boundary,
            ],
            guard: Some(|ctx| ctx.boundary_is_aya_end(2)),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Qalqalah),
        },
        Rule {
            name: "ra_tafkhim",
            pattern: vec![Cc::Char(arabic::REH)],
            guard: None,
            apply: |ctx, sink| classify_ra(ctx, sink, ctx.at[0]),
        },
        // The seven always-heavy letters, light only under kasra.
        Rule {
            name: "heavy_letter",
            pattern: vec![Cc::Pred(arabic::is_heavy_letter)],
            guard: Some(|ctx| {
                !matches!(ctx.buf.get(ctx.at[0] + 1), Some(&c) if is_kasra_class(c))
            }),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::HeavyLetter),
        },
    ]
}
