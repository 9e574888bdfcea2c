//! The closed stylistic-feature vocabulary used for calligraphic
//! elongation. The font exposes a fixed set of cv-features; modeling
//! them as an enum keeps the rule ladders exhaustively checked.

use super::shaper::ShaperFeature;

/// Sentinel for an open-ended feature range ("rest of text").
pub const OPEN_END: usize = usize::MAX;

/// Maximum accumulated kashida level on a single connection.
pub const KASHIDA_CAP: u32 = 6;

/// Maximum accumulated level for a final-alternate form.
pub const ALTERNATE_CAP: u32 = 12;

/// One stylistic-variant feature of the mushaf fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StretchFeature {
    /// cv01: elongation of the first letter of a connection, or of a
    /// final-alternate form.
    Kashida,
    /// cv02: matching elongation on the second letter of a connection.
    ChainedKashida,
    /// cv03: widening of a fatha / shadda riding a stretched letter.
    DiacriticStretch,
    /// cv11..cv18: ligature decomposition variants keyed on the letter
    /// pair and its position within the subword.
    Lig11,
    Lig12,
    Lig13,
    Lig14,
    Lig15,
    Lig16,
    Lig17,
    Lig18,
}

impl StretchFeature {
    pub const fn tag(self) -> [u8; 4] {
        match self {
            StretchFeature::Kashida => *b"cv01",
            StretchFeature::ChainedKashida => *b"cv02",
            StretchFeature::DiacriticStretch => *b"cv03",
            StretchFeature::Lig11 => *b"cv11",
            StretchFeature::Lig12 => *b"cv12",
            StretchFeature::Lig13 => *b"cv13",
            StretchFeature::Lig14 => *b"cv14",
            StretchFeature::Lig15 => *b"cv15",
            StretchFeature::Lig16 => *b"cv16",
            StretchFeature::Lig17 => *b"cv17",
            StretchFeature::Lig18 => *b"cv18",
        }
    }
}

/// A feature activation over a char range of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureOverride {
    pub feature: StretchFeature,
    pub value: u32,
    /// First char index covered (line-relative).
    pub start: usize,
    /// One past the last char index covered; [`OPEN_END`] for the rest
    /// of the line.
    pub end: usize,
}

/// Accumulated feature overrides for one line.
///
/// Setting the same feature at the same start char replaces the previous
/// value; the search raises levels by re-setting with the accumulated
/// count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMap {
    entries: Vec<FeatureOverride>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, feature: StretchFeature, start: usize, end: usize, value: u32) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.feature == feature && e.start == start)
        {
            existing.value = value;
            existing.end = end;
        } else {
            self.entries.push(FeatureOverride {
                feature,
                value,
                start,
                end,
            });
        }
    }

    /// Current value of `feature` starting at `start`, or 0 when unset.
    pub fn value_of(&self, feature: StretchFeature, start: usize) -> u32 {
        self.entries
            .iter()
            .find(|e| e.feature == feature && e.start == start)
            .map(|e| e.value)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureOverride> {
        self.entries.iter()
    }

    /// Convert every override into a shaper feature with line-relative
    /// char ranges.
    pub fn to_shaper_features(&self) -> Vec<ShaperFeature> {
        self.entries
            .iter()
            .map(|e| ShaperFeature {
                tag: e.feature.tag(),
                value: e.value,
                start: e.start,
                end: e.end,
            })
            .collect()
    }

    /// Overrides that fall inside one word, rebased to word-relative
    /// char indices. Used when shaping a word in isolation during the
    /// justification search.
    pub fn for_word(&self, word_start: usize, word_char_len: usize) -> Vec<ShaperFeature> {
        let word_end = word_start + word_char_len;
        self.entries
            .iter()
            .filter(|e| e.start >= word_start && e.start < word_end)
            .map(|e| ShaperFeature {
                tag: e.feature.tag(),
                value: e.value,
                start: e.start - word_start,
                end: if e.end == OPEN_END {
                    OPEN_END
                } else {
                    e.end.min(word_end) - word_start
                },
            })
            .collect()
    }
}
