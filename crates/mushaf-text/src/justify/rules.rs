//! Stretch-site discovery and feature assignment.
//!
//! Each stretch kind is a consonant-pair context over a subword's base
//! text. Matching yields exact base-letter index pairs (the original
//! rules are position-capturing, not substring tests) because feature
//! assignment needs the precise char offsets. The exclusions encoded
//! here are calligraphic law, not heuristics: violating them produces
//! joins no mushaf would print.

use crate::arabic;
use crate::segment::WordInfo;
use crate::shaping::{ALTERNATE_CAP, KASHIDA_CAP, StretchFeature};

use super::just_info::{CommitOutcome, JustInfo};

/// The closed set of stretch/alternate contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StretchKind {
    /// Alternate (swash) form of a word-final letter; no kashida.
    FinalAlternate,
    /// Connection into a tall final letter (alef, lam, kaf, tah, zah).
    AscendantKashida,
    /// Beh-group letter connecting onward, medial contexts.
    BehKashida,
    /// Seen-group tooth stretch.
    SeenKashida,
    /// Connection into a hah-group bowl.
    HahKashida,
    /// Connection into a final reh or zain.
    RehZainKashida,
    /// Dedicated kaf elongation, boosting a trailing fatha/shadda.
    KafElongation,
}

/// Where a letter pair sits within its subword/word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPosition {
    Initial,
    Medial,
    Final,
}

/// One candidate stretch site: base-letter indices within a specific
/// subword of a specific word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchSite {
    pub word: usize,
    pub subword: usize,
    /// Index of the first letter within the subword's base text.
    pub first: usize,
    /// Index of the second letter of the pair; `None` for single-letter
    /// alternate sites.
    pub second: Option<usize>,
}

/// A kashida may never split these pairs.
fn pair_allowed(first: char, second: char) -> bool {
    if first == arabic::LAM && arabic::lam_forbids_stretch_before(second) {
        return false;
    }
    if arabic::is_hamza_form(first) || arabic::is_hamza_form(second) {
        return false;
    }
    true
}

/// Enumerate candidate sites of `kind` within one subword, in logical
/// order.
pub fn sites_in_subword(
    word: &WordInfo,
    word_index: usize,
    subword_index: usize,
    kind: StretchKind,
) -> Vec<StretchSite> {
    let subword = &word.subwords[subword_index];
    let letters = subword.letters();
    let n = letters.len();
    let mut sites = Vec::new();
    if n == 0 {
        return sites;
    }

    let site = |first: usize, second: Option<usize>| StretchSite {
        word: word_index,
        subword: subword_index,
        first,
        second,
    };

    match kind {
        StretchKind::FinalAlternate => {
            // Only the true word-final letter takes a swash form.
            let is_last_subword = subword_index + 1 == word.subwords.len();
            if is_last_subword && arabic::has_final_alternate(letters[n - 1]) {
                sites.push(site(n - 1, None));
            }
        }
        StretchKind::AscendantKashida => {
            if n >= 2
                && arabic::is_ascendant(letters[n - 1])
                && pair_allowed(letters[n - 2], letters[n - 1])
            {
                sites.push(site(n - 2, Some(n - 1)));
            }
        }
        StretchKind::BehKashida => {
            for i in 0..n.saturating_sub(1) {
                // The connection into a final ascendant belongs to
                // AscendantKashida, not here.
                let into_final_ascendant = i + 2 == n && arabic::is_ascendant(letters[i + 1]);
                if arabic::is_beh_group(letters[i])
                    && !into_final_ascendant
                    && pair_allowed(letters[i], letters[i + 1])
                {
                    sites.push(site(i, Some(i + 1)));
                }
            }
        }
        StretchKind::SeenKashida => {
            for i in 0..n.saturating_sub(1) {
                if arabic::is_seen_group(letters[i]) && pair_allowed(letters[i], letters[i + 1]) {
                    sites.push(site(i, Some(i + 1)));
                }
            }
        }
        StretchKind::HahKashida => {
            for i in 0..n.saturating_sub(1) {
                if arabic::is_hah_group(letters[i + 1]) && pair_allowed(letters[i], letters[i + 1])
                {
                    sites.push(site(i, Some(i + 1)));
                }
            }
        }
        StretchKind::RehZainKashida => {
            if n >= 2
                && arabic::is_reh_or_zain(letters[n - 1])
                && pair_allowed(letters[n - 2], letters[n - 1])
            {
                sites.push(site(n - 2, Some(n - 1)));
            }
        }
        StretchKind::KafElongation => {
            if n >= 2 && arabic::is_kaf(letters[n - 1]) && pair_allowed(letters[n - 2], letters[n - 1]) {
                sites.push(site(n - 2, Some(n - 1)));
            }
        }
    }

    sites
}

/// Pick the ligature/decomposition feature for a stretched pair. The
/// ladder is keyed on the two letters and the pair's position within
/// the subword; it is a closed vocabulary, so the fall-through arm is a
/// real variant, not an error.
fn ligature_feature(first: char, second: char, position: PairPosition) -> StretchFeature {
    use StretchFeature::*;
    if arabic::is_beh_group(first) {
        if arabic::is_ascendant(second) {
            Lig11
        } else if arabic::is_hah_group(second) {
            Lig12
        } else if position == PairPosition::Initial {
            Lig13
        } else {
            Lig14
        }
    } else if arabic::is_seen_group(first) {
        Lig15
    } else if arabic::is_hah_group(second) {
        Lig16
    } else if arabic::is_reh_or_zain(second) || position == PairPosition::Final {
        Lig17
    } else {
        Lig18
    }
}

/// Find the char offset (within the word) of a stretchable diacritic
/// directly after the letter at `letter_offset`: a fatha, or the fatha
/// of a shadda+fatha stack.
fn trailing_stretch_diacritic(word: &WordInfo, letter_offset: usize) -> Option<usize> {
    let chars: Vec<char> = word.text.chars().collect();
    let mut i = letter_offset + 1;
    while i < chars.len() && arabic::is_diacritic(chars[i]) {
        match chars[i] {
            arabic::FATHA => return Some(i),
            arabic::SHADDA => {
                if chars.get(i + 1) == Some(&arabic::FATHA) {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Apply one level of `kind` at `site` through the shared commit
/// protocol.
pub fn apply_site(just: &mut JustInfo<'_>, site: &StretchSite, kind: StretchKind) -> CommitOutcome {
    let word = &just.info.words[site.word];
    let subword = &word.subwords[site.subword];
    let letters = subword.letters();

    let first_offset = subword.offsets[site.first];
    let first_char = word.start + first_offset;
    let accumulated = just.overrides().value_of(StretchFeature::Kashida, first_char) + 1;

    let mut edits: Vec<(StretchFeature, usize, usize, u32)> = Vec::new();

    match kind {
        StretchKind::FinalAlternate => {
            if accumulated > ALTERNATE_CAP {
                return CommitOutcome::NoEffect;
            }
            edits.push((StretchFeature::Kashida, first_char, first_char + 1, accumulated));
            if let Some(diacritic) = trailing_stretch_diacritic(word, first_offset) {
                edits.push((
                    StretchFeature::DiacriticStretch,
                    word.start + diacritic,
                    word.start + diacritic + 1,
                    accumulated,
                ));
            }
        }
        _ => {
            if accumulated > KASHIDA_CAP {
                return CommitOutcome::NoEffect;
            }
            let second = site.second.expect("kashida kinds are pair sites");
            let second_offset = subword.offsets[second];
            let second_char = word.start + second_offset;

            let position = if site.first == 0 && site.subword == 0 {
                PairPosition::Initial
            } else if second + 1 == letters.len()
                && site.subword + 1 == word.subwords.len()
            {
                PairPosition::Final
            } else {
                PairPosition::Medial
            };

            // A final ascendant closing the subword takes double the
            // elongation of its partner so the stroke rises smoothly.
            let chained = if second + 1 == letters.len() && arabic::is_ascendant(letters[second]) {
                accumulated * 2
            } else {
                accumulated
            };

            edits.push((StretchFeature::Kashida, first_char, first_char + 1, accumulated));
            edits.push((
                ligature_feature(letters[site.first], letters[second], position),
                first_char,
                second_char + 1,
                1,
            ));
            edits.push((StretchFeature::ChainedKashida, second_char, second_char + 1, chained));

            if kind == StretchKind::KafElongation {
                if let Some(diacritic) = trailing_stretch_diacritic(word, second_offset) {
                    edits.push((
                        StretchFeature::DiacriticStretch,
                        word.start + diacritic,
                        word.start + diacritic + 1,
                        accumulated,
                    ));
                }
            }
        }
    }

    just.try_commit(site.word, &edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Line, segment};

    fn word(text: &str) -> WordInfo {
        segment(&Line::content(text)).words.remove(0)
    }

    #[test]
    fn lam_kaf_is_never_a_site() {
        let w = word("ملك");
        // Subword "ملك": the lam-kaf join must not appear as an
        // ascendant site even though kaf is an ascendant.
        let sites = sites_in_subword(&w, 0, 0, StretchKind::AscendantKashida);
        assert!(sites.is_empty());
    }

    #[test]
    fn beh_before_final_ascendant_is_left_to_ascendant_rule() {
        let w = word("بل");
        assert!(sites_in_subword(&w, 0, 0, StretchKind::BehKashida).is_empty());
        assert_eq!(
            sites_in_subword(&w, 0, 0, StretchKind::AscendantKashida).len(),
            1
        );
    }

    #[test]
    fn beh_group_medial_pair_matches() {
        let w = word("يعلمون");
        // Subwords: "يعلمو", "ن". The yeh-ain join is a beh-group site.
        let sites = sites_in_subword(&w, 0, 0, StretchKind::BehKashida);
        assert!(sites.iter().any(|s| s.first == 0 && s.second == Some(1)));
    }

    #[test]
    fn final_alternate_only_on_word_final_subword() {
        let w = word("الرحمن");
        // Last subword "حمن" ends the word with noon: one site there.
        let last = w.subwords.len() - 1;
        assert_eq!(
            sites_in_subword(&w, 0, last, StretchKind::FinalAlternate).len(),
            1
        );
        assert!(sites_in_subword(&w, 0, 0, StretchKind::FinalAlternate).is_empty());
    }

    #[test]
    fn trailing_diacritic_sees_through_shadda() {
        let w = word("كَتَّب");
        // Offset 2 is the teh carrying shadda+fatha.
        assert_eq!(trailing_stretch_diacritic(&w, 2), Some(4));
    }
}
