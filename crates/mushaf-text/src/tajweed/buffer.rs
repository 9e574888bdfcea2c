use crate::segment::{Line, LineType};

use super::{ColorClass, TajweedMap};

/// Placeholder inserted for a basmala line so rules never read across a
/// verse boundary as if the text were contiguous.
pub const BASMALA_SEPARATOR: char = '\u{06DE}';

/// The page's concatenated rule buffer plus the offset remap back to
/// (line, in-line char offset).
///
/// Content lines are joined with a synthetic space so word-boundary
/// rules behave identically at line breaks and at real spaces; header
/// lines contribute nothing. The remap is built in the same forward
/// scan that builds the buffer, so resolving any buffer offset is a
/// single indexed load.
#[derive(Debug)]
pub struct PageText {
    pub chars: Vec<char>,
    /// For each buffer char: its owning (line, offset), or `None` for
    /// synthetic separators.
    origin: Vec<Option<(usize, usize)>>,
}

impl PageText {
    pub fn build(lines: &[Line]) -> Self {
        let mut chars = Vec::new();
        let mut origin = Vec::new();
        let mut first = true;

        for (line_index, line) in lines.iter().enumerate() {
            match line.line_type {
                LineType::SurahHeader => continue,
                LineType::Basmala => {
                    if !first {
                        chars.push(' ');
                        origin.push(None);
                    }
                    chars.push(BASMALA_SEPARATOR);
                    origin.push(None);
                    first = false;
                }
                LineType::Content => {
                    if !first {
                        chars.push(' ');
                        origin.push(None);
                    }
                    for (offset, c) in line.text.chars().enumerate() {
                        chars.push(c);
                        origin.push(Some((line_index, offset)));
                    }
                    first = false;
                }
            }
        }

        Self { chars, origin }
    }

    pub fn origin_of(&self, buffer_index: usize) -> Option<(usize, usize)> {
        self.origin.get(buffer_index).copied().flatten()
    }
}

/// Collects class assignments, resolving buffer offsets back to lines.
/// `set` overwrites and `clear` deletes: later rules are allowed to
/// correct earlier ones.
#[derive(Debug)]
pub struct ClassSink<'a> {
    maps: Vec<TajweedMap>,
    page: &'a PageText,
}

impl<'a> ClassSink<'a> {
    pub fn new(line_count: usize, page: &'a PageText) -> Self {
        Self {
            maps: (0..line_count).map(|_| TajweedMap::new()).collect(),
            page,
        }
    }

    pub fn set(&mut self, buffer_index: usize, class: ColorClass) {
        if let Some((line, offset)) = self.page.origin_of(buffer_index) {
            self.maps[line].insert(offset, class);
        }
    }

    pub fn clear(&mut self, buffer_index: usize) {
        if let Some((line, offset)) = self.page.origin_of(buffer_index) {
            self.maps[line].remove(&offset);
        }
    }

    pub fn into_maps(self) -> Vec<TajweedMap> {
        self.maps
    }
}
