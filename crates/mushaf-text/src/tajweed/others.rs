//! "Others" pass: nasalization assimilation (idgham, ikhfa, iqlab) and
//! the madd duration classes.
//!
//! The table is variant-parameterized: Madinah and IndoPak orthography
//! write the muttasil/munfasil prolongations differently, so those two
//! rules are swapped wholesale rather than unified. The near-duplicate
//! patterns are intentional; their lookaround differences encode
//! variant-specific orthographic corrections.

use crate::arabic;

use super::ColorClass;
use super::patterns::{Cc, Rule, RuleCtx};

const SMALL_HIGH_MEEM: char = '\u{06E2}';

fn noon_or_meem(c: char) -> bool {
    c == arabic::NOON || c == arabic::MEEM || c == '\u{06BA}'
}

fn sukun_or_small_meem(c: char) -> bool {
    arabic::is_sukun(c) || c == SMALL_HIGH_MEEM
}

fn waw_or_yeh(c: char) -> bool {
    matches!(c, '\u{0648}' | '\u{064A}' | '\u{06CC}')
}

fn yeh_like(c: char) -> bool {
    matches!(c, '\u{064A}' | '\u{0649}' | '\u{06CC}')
}

fn alef_like(c: char) -> bool {
    matches!(c, '\u{0627}' | '\u{0649}')
}

/// Bare-letter guard: the anchor letter wears no mark at all. Madinah
/// orthography strips the sukun from an assimilating noon/meem, which
/// is exactly what distinguishes these duplicates from the sukun rules.
fn anchor_is_bare(ctx: &RuleCtx) -> bool {
    !matches!(ctx.buf.get(ctx.at[0] + 1), Some(&c) if arabic::is_diacritic(c))
}

/// Guard for plain (two-count) madd: no written maddah and no hamza
/// ahead, otherwise a longer prolongation owns this site.
fn plain_madd_guard(ctx: &RuleCtx, madd_index: usize) -> bool {
    if ctx.buf.get(madd_index + 1) == Some(&arabic::MADDAH) {
        return false;
    }
    !matches!(
        ctx.next_base_from(madd_index + 1),
        Some((_, c)) if arabic::is_hamza_form(c)
    )
}

/// Does the vowel select this madd letter (fatha-alef, kasra-yeh,
/// damma-waw)?
fn vowel_selects(vowel: char, madd: char) -> bool {
    match vowel {
        arabic::FATHA => alef_like(madd),
        arabic::KASRA => yeh_like(madd),
        arabic::DAMMA => madd == arabic::WAW,
        _ => false,
    }
}

pub fn rules(indopak: bool) -> Vec<Rule> {
    let mut rules = vec![
        Rule {
            name: "ghunnah_shadda",
            pattern: vec![Cc::Pred(noon_or_meem), Cc::Char(arabic::SHADDA)],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Ghunnah),
        },
        Rule {
            name: "iqlab_noon_sukun",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Pred(sukun_or_small_meem),
                Cc::OptSpace,
                Cc::Char(arabic::BEH),
            ],
            guard: None,
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::Iqlab);
                sink.set(ctx.at[3], ColorClass::Iqlab);
            },
        },
        Rule {
            name: "iqlab_noon_bare",
            pattern: vec![Cc::Char(arabic::NOON), Cc::OptSpace, Cc::Char(arabic::BEH)],
            guard: Some(anchor_is_bare),
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::Iqlab);
                sink.set(ctx.at[2], ColorClass::Iqlab);
            },
        },
        Rule {
            name: "iqlab_tanween",
            pattern: vec![
                Cc::Pred(arabic::is_tanween),
                Cc::OptSpace,
                Cc::Char(arabic::BEH),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Iqlab),
        },
        Rule {
            name: "idgham_ghunnah_noon_sukun",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Pred(arabic::is_sukun),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_ghunnah_letter),
            ],
            guard: None,
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamGhunnah);
                sink.set(ctx.at[3], ColorClass::IdghamGhunnah);
            },
        },
        Rule {
            name: "idgham_ghunnah_noon_bare",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_ghunnah_letter),
            ],
            guard: Some(anchor_is_bare),
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamGhunnah);
                sink.set(ctx.at[2], ColorClass::IdghamGhunnah);
            },
        },
        Rule {
            name: "idgham_ghunnah_tanween",
            pattern: vec![
                Cc::Pred(arabic::is_tanween),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_ghunnah_letter),
            ],
            guard: None,
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamGhunnah);
                sink.set(ctx.at[2], ColorClass::IdghamGhunnah);
            },
        },
        Rule {
            name: "idgham_no_ghunnah_noon_sukun",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Pred(arabic::is_sukun),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_no_ghunnah_letter),
            ],
            guard: None,
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamNoGhunnah);
                sink.set(ctx.at[3], ColorClass::IdghamNoGhunnah);
            },
        },
        Rule {
            name: "idgham_no_ghunnah_noon_bare",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_no_ghunnah_letter),
            ],
            guard: Some(anchor_is_bare),
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamNoGhunnah);
                sink.set(ctx.at[2], ColorClass::IdghamNoGhunnah);
            },
        },
        Rule {
            name: "idgham_no_ghunnah_tanween",
            pattern: vec![
                Cc::Pred(arabic::is_tanween),
                Cc::Space,
                Cc::Pred(arabic::is_idgham_no_ghunnah_letter),
            ],
            guard: None,
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamNoGhunnah);
                sink.set(ctx.at[2], ColorClass::IdghamNoGhunnah);
            },
        },
        Rule {
            name: "idgham_meem",
            pattern: vec![
                Cc::Char(arabic::MEEM),
                Cc::Marks,
                Cc::Space,
                Cc::Char(arabic::MEEM),
            ],
            guard: Some(meem_exposed),
            apply: |ctx, sink| {
                sink.set(ctx.at[0], ColorClass::IdghamGhunnah);
                sink.set(ctx.at[3], ColorClass::IdghamGhunnah);
            },
        },
        Rule {
            name: "ikhfa_meem",
            pattern: vec![
                Cc::Char(arabic::MEEM),
                Cc::Marks,
                Cc::OptSpace,
                Cc::Char(arabic::BEH),
            ],
            guard: Some(meem_exposed),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Ikhfa),
        },
        Rule {
            name: "ikhfa_noon_sukun",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::Pred(arabic::is_sukun),
                Cc::OptSpace,
                Cc::Pred(arabic::is_ikhfa_letter),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Ikhfa),
        },
        Rule {
            name: "ikhfa_noon_bare",
            pattern: vec![
                Cc::Char(arabic::NOON),
                Cc::OptSpace,
                Cc::Pred(arabic::is_ikhfa_letter),
            ],
            guard: Some(anchor_is_bare),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Ikhfa),
        },
        Rule {
            name: "ikhfa_tanween",
            pattern: vec![
                Cc::Pred(arabic::is_tanween),
                Cc::OptSpace,
                Cc::Pred(arabic::is_ikhfa_letter),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Ikhfa),
        },
        Rule {
            name: "madd_lazim",
            pattern: vec![Cc::Pred(arabic::is_madd_letter), Cc::Char(arabic::MADDAH)],
            guard: Some(|ctx| {
                // Obligatory madd: the next letter is doubled or dead.
                match ctx.next_base_from(ctx.end) {
                    Some((i, c)) if arabic::is_base_letter(c) => {
                        matches!(ctx.buf.get(i + 1), Some(&m)
                            if m == arabic::SHADDA || arabic::is_sukun(m))
                    }
                    _ => false,
                }
            }),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd6),
        },
    ];

    if indopak {
        // IndoPak orthography carries no maddah sign over a muttasil
        // madd; the hamza itself is the marker.
        rules.push(Rule {
            name: "madd_muttasil_indopak",
            pattern: vec![Cc::Pred(arabic::is_madd_letter)],
            guard: Some(|ctx| {
                matches!(
                    ctx.next_base_from(ctx.at[0] + 1),
                    Some((_, c)) if arabic::is_hamza_form(c)
                )
            }),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd46),
        });
        rules.push(Rule {
            name: "madd_munfasil_indopak",
            pattern: vec![
                Cc::Pred(arabic::is_madd_letter),
                Cc::Marks,
                Cc::Space,
                Cc::Pred(arabic::is_hamza_form),
            ],
            guard: None,
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd4),
        });
    } else {
        rules.push(Rule {
            name: "madd_muttasil_madinah",
            pattern: vec![Cc::Pred(arabic::is_madd_letter), Cc::Char(arabic::MADDAH)],
            guard: Some(|ctx| {
                matches!(
                    ctx.next_base_from(ctx.end),
                    Some((_, c)) if arabic::is_hamza_form(c)
                )
            }),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd46),
        });
        rules.push(Rule {
            name: "madd_munfasil_madinah",
            pattern: vec![
                Cc::Pred(arabic::is_madd_letter),
                Cc::Marks,
                Cc::Space,
                Cc::Pred(arabic::is_hamza_form),
            ],
            guard: Some(|ctx| ctx.buf.get(ctx.at[0] + 1) != Some(&arabic::MADDAH)),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd4),
        });
    }

    rules.extend([
        // A following hamzat wasl swallows the prolongation entirely:
        // whatever class the madd letter picked up is deleted.
        Rule {
            name: "madd_cancelled_by_wasla",
            pattern: vec![
                Cc::Pred(arabic::is_short_vowel),
                Cc::Pred(arabic::is_madd_letter),
                Cc::Marks,
                Cc::Space,
                Cc::Char(arabic::ALEF_WASLA),
            ],
            guard: Some(|ctx| {
                let (Some(v), Some(m)) = (ctx.char_at(0), ctx.char_at(1)) else {
                    return false;
                };
                vowel_selects(v, m)
            }),
            apply: |ctx, sink| sink.clear(ctx.at[1]),
        },
        // Madd arid lil-sukun: prolongation carried into a verse-end
        // pause stretches two, four, or six counts.
        Rule {
            name: "madd_arid",
            pattern: vec![
                Cc::Pred(arabic::is_short_vowel),
                Cc::Pred(arabic::is_madd_letter),
                Cc::Pred(arabic::is_base_letter),
                Cc::Marks,
                Cc::Boundary,
            ],
            guard: Some(|ctx| {
                let (Some(v), Some(m)) = (ctx.char_at(0), ctx.char_at(1)) else {
                    return false;
                };
                vowel_selects(v, m) && ctx.boundary_is_aya_end(4)
            }),
            apply: |ctx, sink| sink.set(ctx.at[1], ColorClass::Madd246),
        },
        Rule {
            name: "madd_leen",
            pattern: vec![
                Cc::Char(arabic::FATHA),
                Cc::Pred(waw_or_yeh),
                Cc::Pred(arabic::is_sukun),
                Cc::Pred(arabic::is_base_letter),
                Cc::Marks,
                Cc::Boundary,
            ],
            guard: Some(|ctx| ctx.boundary_is_aya_end(5)),
            apply: |ctx, sink| sink.set(ctx.at[1], ColorClass::MaddLeen),
        },
        Rule {
            name: "madd_tabii_fatha_alef",
            pattern: vec![Cc::Char(arabic::FATHA), Cc::Pred(alef_like)],
            guard: Some(|ctx| plain_madd_guard(ctx, ctx.at[1])),
            apply: |ctx, sink| sink.set(ctx.at[1], ColorClass::Madd2),
        },
        Rule {
            name: "madd_tabii_kasra_yeh",
            pattern: vec![Cc::Char(arabic::KASRA), Cc::Pred(yeh_like)],
            guard: Some(|ctx| {
                plain_madd_guard(ctx, ctx.at[1])
                    && !matches!(ctx.buf.get(ctx.at[1] + 1), Some(&c)
                        if arabic::is_short_vowel(c) || c == arabic::SHADDA || arabic::is_tanween(c))
            }),
            apply: |ctx, sink| sink.set(ctx.at[1], ColorClass::Madd2),
        },
        Rule {
            name: "madd_tabii_damma_waw",
            pattern: vec![Cc::Char(arabic::DAMMA), Cc::Char(arabic::WAW)],
            guard: Some(|ctx| {
                plain_madd_guard(ctx, ctx.at[1])
                    && !matches!(ctx.buf.get(ctx.at[1] + 1), Some(&c)
                        if arabic::is_short_vowel(c) || c == arabic::SHADDA || arabic::is_tanween(c))
            }),
            apply: |ctx, sink| sink.set(ctx.at[1], ColorClass::Madd2),
        },
        // Dagger alef is itself the two-count carrier.
        Rule {
            name: "madd_tabii_superscript",
            pattern: vec![Cc::Char(arabic::SUPERSCRIPT_ALEF)],
            guard: Some(|ctx| {
                !matches!(
                    ctx.next_base_from(ctx.at[0] + 1),
                    Some((_, c)) if arabic::is_hamza_form(c)
                )
            }),
            apply: |ctx, sink| sink.set(ctx.at[0], ColorClass::Madd2),
        },
    ]);

    rules
}

/// The meem is a candidate for shafawi rules only when dead or bare.
fn meem_exposed(ctx: &RuleCtx) -> bool {
    match ctx.buf.get(ctx.at[0] + 1) {
        Some(&c) if arabic::is_diacritic(c) => arabic::is_sukun(c),
        _ => true,
    }
}
