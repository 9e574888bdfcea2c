//! Madinah-variant stretch search: a fixed, hand-ordered cascade.
//!
//! Each stage raises one stretch kind to a target level across the
//! whole line. The ordering is the Madinah convention's aesthetic
//! priority; reordering stages changes which letters carry the
//! elongation on real pages, so the table is data, not derived.

use tracing::debug;

use crate::shaping::StretchFeature;

use super::just_info::{CommitOutcome, JustInfo};
use super::rules::{self, StretchKind};

/// (kind, target accumulated level) stages, tried in order. The cascade
/// short-circuits as soon as a stage reports the line is full (either
/// the gap closed or the next edit would overflow).
const CASCADE: &[(StretchKind, u32)] = &[
    (StretchKind::FinalAlternate, 1),
    (StretchKind::AscendantKashida, 1),
    (StretchKind::BehKashida, 1),
    (StretchKind::KafElongation, 1),
    (StretchKind::SeenKashida, 1),
    (StretchKind::HahKashida, 1),
    (StretchKind::RehZainKashida, 1),
    (StretchKind::FinalAlternate, 2),
    (StretchKind::AscendantKashida, 2),
    (StretchKind::BehKashida, 2),
    (StretchKind::KafElongation, 2),
    (StretchKind::SeenKashida, 2),
    (StretchKind::HahKashida, 2),
    (StretchKind::RehZainKashida, 2),
    (StretchKind::AscendantKashida, 3),
    (StretchKind::FinalAlternate, 4),
    (StretchKind::BehKashida, 4),
    (StretchKind::AscendantKashida, 6),
    (StretchKind::FinalAlternate, 8),
];

/// Run the cascade until the gap closes, an edit overflows, or every
/// stage is exhausted.
pub fn run(just: &mut JustInfo<'_>) {
    for (stage, &(kind, target)) in CASCADE.iter().enumerate() {
        if run_stage(just, kind, target) {
            debug!(stage, ?kind, target, "madinah cascade stopped");
            return;
        }
    }
    debug!(gap = just.gap(), "madinah cascade exhausted");
}

/// Returns true when the cascade should stop: the line filled up or a
/// commit overflowed.
fn run_stage(just: &mut JustInfo<'_>, kind: StretchKind, target: u32) -> bool {
    for word_index in 0..just.info.words.len() {
        for subword_index in 0..just.info.words[word_index].subwords.len() {
            let sites =
                rules::sites_in_subword(&just.info.words[word_index], word_index, subword_index, kind);
            for site in &sites {
                loop {
                    if just.done() {
                        return true;
                    }
                    let word = &just.info.words[site.word];
                    let first_char = word.start + word.subwords[site.subword].offsets[site.first];
                    if just.overrides().value_of(StretchFeature::Kashida, first_char) >= target {
                        break;
                    }
                    match rules::apply_site(just, site, kind) {
                        CommitOutcome::Committed => continue,
                        CommitOutcome::NoEffect => break,
                        CommitOutcome::Overflow => return true,
                    }
                }
            }
        }
    }
    just.done()
}
