//! Line segmentation: words, subwords, and space classification.
//!
//! A subword is a maximal run of letters that remain visually joined.
//! Kashida insertion is only legal inside a subword, so getting this
//! topology right is the precondition for the whole justification
//! engine.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::arabic;

/// Role of a physical line on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Content,
    SurahHeader,
    Basmala,
}

/// One physical line of logical-order Arabic text.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    pub line_type: LineType,
    /// Fraction of the column width this line should occupy. Headers and
    /// intentionally short lines deviate from 1.0.
    pub width_ratio: f32,
}

impl Line {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_type: LineType::Content,
            width_ratio: 1.0,
        }
    }

    pub fn basmala(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_type: LineType::Basmala,
            width_ratio: 0.8,
        }
    }

    pub fn surah_header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_type: LineType::SurahHeader,
            width_ratio: 0.6,
        }
    }

    pub fn with_width_ratio(mut self, ratio: f32) -> Self {
        self.width_ratio = ratio;
        self
    }
}

/// Classification of a space character within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    /// Ordinary inter-word space.
    Simple,
    /// Space at a verse boundary (adjacent to a verse number or the
    /// end-of-ayah sign). Stretches more aggressively than word spaces.
    AyaEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceInfo {
    /// Char index of the space within the line.
    pub char_index: usize,
    pub kind: SpaceKind,
}

/// A maximal visually-joined run of base letters within a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subword {
    /// The base letters of this run, in logical order.
    pub base_text: String,
    /// Char offset of each base letter within the owning word.
    pub offsets: Vec<usize>,
}

impl Subword {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn letters(&self) -> Vec<char> {
        self.base_text.chars().collect()
    }
}

/// A contiguous space-delimited span of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    /// Char index of the word's first character within the line.
    pub start: usize,
    /// Number of chars in the word.
    pub char_len: usize,
    /// The word's full text, diacritics included.
    pub text: String,
    /// Only the base letters, diacritics stripped.
    pub base_text: String,
    pub subwords: Vec<Subword>,
}

/// Segmentation result for one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineTextInfo {
    pub words: Vec<WordInfo>,
    pub spaces: Vec<SpaceInfo>,
}

impl LineTextInfo {
    /// Count of (simple, aya-end) spaces.
    pub fn space_counts(&self) -> (usize, usize) {
        let simple = self
            .spaces
            .iter()
            .filter(|s| s.kind == SpaceKind::Simple)
            .count();
        (simple, self.spaces.len() - simple)
    }

    /// Look up the kind of the space at `char_index`, if that position
    /// is a classified space.
    pub fn space_kind_at(&self, char_index: usize) -> Option<SpaceKind> {
        self.spaces
            .iter()
            .find(|s| s.char_index == char_index)
            .map(|s| s.kind)
    }

    /// Index of the word containing line char `char_index`, if any.
    pub fn word_at(&self, char_index: usize) -> Option<usize> {
        self.words
            .iter()
            .position(|w| char_index >= w.start && char_index < w.start + w.char_len)
    }
}

struct WordBuilder {
    start: usize,
    text: String,
    base_text: String,
    subwords: Vec<Subword>,
    current: Subword,
    /// Set after a right-joining-only letter; the next base letter (if
    /// any) starts a new subword.
    pending_break: bool,
    char_len: usize,
}

impl WordBuilder {
    fn new(start: usize) -> Self {
        Self {
            start,
            text: String::new(),
            base_text: String::new(),
            subwords: Vec::new(),
            current: Subword {
                base_text: String::new(),
                offsets: Vec::new(),
            },
            pending_break: false,
            char_len: 0,
        }
    }

    fn close_subword(&mut self) {
        if !self.current.is_empty() {
            let done = std::mem::replace(
                &mut self.current,
                Subword {
                    base_text: String::new(),
                    offsets: Vec::new(),
                },
            );
            self.subwords.push(done);
        }
        self.pending_break = false;
    }

    fn push(&mut self, c: char) {
        let offset = self.char_len;
        self.text.push(c);
        self.char_len += 1;

        if !arabic::is_base_letter(c) {
            return;
        }
        self.base_text.push(c);

        if c == arabic::HAMZA {
            // Hamza joins nothing: it closes whatever was open and forms
            // a one-letter subword of its own.
            self.close_subword();
            self.current.base_text.push(c);
            self.current.offsets.push(offset);
            self.close_subword();
            return;
        }

        if self.pending_break {
            self.close_subword();
        }
        self.current.base_text.push(c);
        self.current.offsets.push(offset);
        if arabic::is_right_joining(c) {
            self.pending_break = true;
        }
    }

    fn finish(mut self) -> Option<WordInfo> {
        self.close_subword();
        if self.char_len == 0 {
            return None;
        }
        Some(WordInfo {
            start: self.start,
            char_len: self.char_len,
            text: self.text,
            base_text: self.base_text,
            subwords: self.subwords,
        })
    }
}

/// Segment a line into words, subwords, and classified spaces.
///
/// Pure function of the line text: segmenting the same text twice yields
/// identical structures.
pub fn segment(line: &Line) -> LineTextInfo {
    let chars: Vec<char> = line.text.chars().collect();
    let mut info = LineTextInfo::default();
    let mut word: Option<WordBuilder> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            if let Some(builder) = word.take() {
                if let Some(done) = builder.finish() {
                    info.words.push(done);
                }
            }
            info.spaces.push(SpaceInfo {
                char_index: i,
                kind: classify_space(&chars, i),
            });
            continue;
        }
        word.get_or_insert_with(|| WordBuilder::new(i)).push(c);
    }
    if let Some(builder) = word.take() {
        if let Some(done) = builder.finish() {
            info.words.push(done);
        }
    }

    info
}

/// A space is a verse boundary when the nearest non-space neighbor on
/// either side is a verse number digit or the end-of-ayah sign.
fn classify_space(chars: &[char], i: usize) -> SpaceKind {
    let before = chars[..i].iter().rev().find(|&&c| c != ' ');
    let after = chars[i + 1..].iter().find(|&&c| c != ' ');
    let is_marker = |c: &char| arabic::is_arabic_digit(*c) || *c == arabic::END_OF_AYAH;
    if before.is_some_and(is_marker) || after.is_some_and(is_marker) {
        SpaceKind::AyaEnd
    } else {
        SpaceKind::Simple
    }
}

/// Process-lifetime segmentation cache keyed by (page, line).
///
/// Invalidated only by an explicit [`SegmentCache::clear`], which must
/// happen together with the outline/page caches on any layout-affecting
/// configuration change.
#[derive(Debug, Default)]
pub struct SegmentCache {
    map: HashMap<(usize, usize), Arc<LineTextInfo>>,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get_or_segment(&mut self, page: usize, line_index: usize, line: &Line) -> Arc<LineTextInfo> {
        self.map
            .entry((page, line_index))
            .or_insert_with(|| Arc::new(segment(line)))
            .clone()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subword_texts(word: &WordInfo) -> Vec<&str> {
        word.subwords.iter().map(|s| s.base_text.as_str()).collect()
    }

    #[test]
    fn segmentation_is_idempotent() {
        let line = Line::content("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ");
        let a = segment(&line);
        let b = segment(&line);
        assert_eq!(a, b);
    }

    #[test]
    fn basmala_words_and_spaces() {
        let line = Line::content("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ");
        let info = segment(&line);
        assert_eq!(info.words.len(), 4);
        assert_eq!(info.spaces.len(), 3);
        assert!(info.spaces.iter().all(|s| s.kind == SpaceKind::Simple));
    }

    #[test]
    fn subword_topology_fixed_table() {
        // (word, expected subword base texts)
        let table: &[(&str, &[&str])] = &[
            ("بسم", &["بسم"]),
            ("الرحمن", &["ا", "لر", "حمن"]),
            ("شيء", &["شي", "ء"]),
            ("قرأ", &["قر", "أ"]),
            ("ورود", &["و", "ر", "و", "د"]),
            ("كتاب", &["كتا", "ب"]),
            ("ءامنوا", &["ء", "ا", "منو", "ا"]),
        ];
        for (text, expected) in table {
            let info = segment(&Line::content(*text));
            assert_eq!(info.words.len(), 1, "{text}");
            assert_eq!(&subword_texts(&info.words[0]), expected, "{text}");
        }
    }

    #[test]
    fn hamza_is_always_a_one_letter_subword() {
        let info = segment(&Line::content("شيء"));
        let last = info.words[0].subwords.last().unwrap();
        assert_eq!(last.base_text, "ء");
        assert_eq!(last.len(), 1);
    }

    #[test]
    fn diacritics_keep_their_offsets_out_of_subwords() {
        let info = segment(&Line::content("بِسْمِ"));
        let word = &info.words[0];
        assert_eq!(word.base_text, "بسم");
        assert_eq!(word.subwords.len(), 1);
        // ب at 0, س at 2, م at 4 (harakat occupy 1, 3, 5).
        assert_eq!(word.subwords[0].offsets, vec![0, 2, 4]);
    }

    #[test]
    fn space_next_to_verse_number_is_aya_end() {
        let line = Line::content("كتاب ١ وكتاب");
        let info = segment(&line);
        let kinds: Vec<SpaceKind> = info.spaces.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SpaceKind::AyaEnd, SpaceKind::AyaEnd]);
    }

    #[test]
    fn space_next_to_end_of_ayah_sign_is_aya_end() {
        let line = Line::content("قل هو \u{06DD}١");
        let info = segment(&line);
        assert_eq!(info.spaces[0].kind, SpaceKind::Simple);
        assert_eq!(info.spaces[1].kind, SpaceKind::AyaEnd);
    }

    #[test]
    fn cache_returns_identical_arc_until_cleared() {
        let mut cache = SegmentCache::new();
        let line = Line::content("بسم");
        let a = cache.get_or_segment(1, 2, &line);
        let b = cache.get_or_segment(1, 2, &line);
        assert!(Arc::ptr_eq(&a, &b));
        cache.clear();
        assert!(cache.is_empty());
    }
}
