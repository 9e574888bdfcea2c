//! IndoPak-variant stretch search: one unified backward scan.
//!
//! Unlike the Madinah cascade, the IndoPak convention walks from the
//! end of the line toward its start, finishing each word before moving
//! on: alternates first, then the kashida contexts, two levels each.

use tracing::debug;

use crate::shaping::StretchFeature;

use super::just_info::{CommitOutcome, JustInfo};
use super::rules::{self, StretchKind};

const LEVELS: u32 = 2;

/// Kinds in application order within each subword.
const KINDS: &[StretchKind] = &[
    StretchKind::FinalAlternate,
    StretchKind::AscendantKashida,
    StretchKind::BehKashida,
    StretchKind::SeenKashida,
    StretchKind::HahKashida,
    StretchKind::RehZainKashida,
    StretchKind::KafElongation,
];

pub fn run(just: &mut JustInfo<'_>) {
    for word_index in (0..just.info.words.len()).rev() {
        for subword_index in (0..just.info.words[word_index].subwords.len()).rev() {
            for &kind in KINDS {
                let sites = rules::sites_in_subword(
                    &just.info.words[word_index],
                    word_index,
                    subword_index,
                    kind,
                );
                for site in &sites {
                    loop {
                        if just.done() {
                            return;
                        }
                        let word = &just.info.words[site.word];
                        let first_char =
                            word.start + word.subwords[site.subword].offsets[site.first];
                        if just.overrides().value_of(StretchFeature::Kashida, first_char) >= LEVELS
                        {
                            break;
                        }
                        match rules::apply_site(just, site, kind) {
                            CommitOutcome::Committed => continue,
                            CommitOutcome::NoEffect => break,
                            CommitOutcome::Overflow => {
                                debug!("indopak scan stopped on overflow");
                                return;
                            }
                        }
                    }
                }
            }
        }
    }
    debug!(gap = just.gap(), "indopak scan exhausted");
}
