//! Tajweed classification: maps every character of a page to a
//! recitation color class.
//!
//! The whole page is concatenated into one buffer (headers skipped,
//! basmala lines reduced to a separator) so rules can see context
//! across line boundaries, then two rule passes run over it: tafkhim
//! (heavy letters, qalqalah, silent letters) and the "others" pass
//! (nasalization assimilation and the madd duration classes). Rules
//! may overwrite or delete classes set earlier; classification is not
//! append-only.

mod buffer;
mod others;
mod patterns;
mod tafkhim;

pub use buffer::PageText;
pub use patterns::{Cc, Rule, RuleCtx};

use hashbrown::HashMap;

use crate::segment::Line;

use buffer::ClassSink;
use patterns::run_pass;

/// Recitation color classes. The palette mapping is presentation
/// configuration; the engine only assigns classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    /// Tafkhim: heavy/emphatic pronunciation.
    HeavyLetter,
    /// Echoed stop on a qalqalah letter.
    Qalqalah,
    /// Written but unpronounced letter.
    Silent,
    /// Nasalization of a doubled noon/meem.
    Ghunnah,
    /// Assimilation with nasalization.
    IdghamGhunnah,
    /// Assimilation without nasalization.
    IdghamNoGhunnah,
    /// Concealed noon/meem.
    Ikhfa,
    /// Noon converted to meem before beh.
    Iqlab,
    /// Natural two-count prolongation.
    Madd2,
    /// Two, four, or six counts (stopping contexts).
    Madd246,
    /// Four counts (separated prolongation).
    Madd4,
    /// Four to five counts (connected prolongation).
    Madd46,
    /// Obligatory six counts.
    Madd6,
    /// Eased prolongation on waw/yeh after fatha.
    MaddLeen,
}

/// Per-line map from char offset to color class.
pub type TajweedMap = HashMap<usize, ColorClass>;

/// Classify a page of lines. Deterministic: the same input always
/// produces the same maps.
pub fn classify(lines: &[Line], indopak: bool) -> Vec<TajweedMap> {
    let page = PageText::build(lines);
    let mut sink = ClassSink::new(lines.len(), &page);
    run_pass(&tafkhim::rules(), &page, &mut sink);
    run_pass(&others::rules(indopak), &page, &mut sink);
    sink.into_maps()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Line;

    fn classify_one(text: &str) -> TajweedMap {
        classify(&[Line::content(text)], false).remove(0)
    }

    #[test]
    fn classification_is_deterministic() {
        let lines = vec![
            Line::content("قُلْ هُوَ ٱللَّهُ أَحَدٌ"),
            Line::content("ٱللَّهُ ٱلصَّمَدُ"),
        ];
        let a = classify(&lines, false);
        let b = classify(&lines, false);
        assert_eq!(a, b);
    }

    #[test]
    fn header_lines_produce_empty_maps() {
        let lines = vec![
            Line::surah_header("سورة الإخلاص"),
            Line::content("قل هو"),
        ];
        let maps = classify(&lines, false);
        assert!(maps[0].is_empty());
    }

    #[test]
    fn qalqalah_on_sukun() {
        // قد: dal does not carry sukun here, but qaf+sukun does in قدْ.
        let map = classify_one("قَدْ");
        // د carries the sukun: qalqalah on the dal (offset 2).
        assert_eq!(map.get(&2), Some(&ColorClass::Qalqalah));
    }

    #[test]
    fn heavy_letter_skipped_when_kasra_follows() {
        let map = classify_one("صِفْ");
        assert_eq!(map.get(&0), None);
        let map = classify_one("صَفْ");
        assert_eq!(map.get(&0), Some(&ColorClass::HeavyLetter));
    }

    #[test]
    fn iqlab_noon_before_beh() {
        // منۢ بعد: noon sukun before beh across a space.
        let map = classify_one("مِنْ بَعْدِ");
        assert_eq!(map.get(&2), Some(&ColorClass::Iqlab));
    }

    #[test]
    fn idgham_requires_word_boundary() {
        // Within a word (دنيا) noon+yeh does NOT assimilate.
        let map = classify_one("دُنْيَا");
        assert_ne!(map.get(&2), Some(&ColorClass::IdghamGhunnah));
        // Across words it does.
        let map = classify_one("مَنْ يَقُولُ");
        assert_eq!(map.get(&2), Some(&ColorClass::IdghamGhunnah));
    }

    #[test]
    fn ghunnah_on_doubled_noon() {
        let map = classify_one("إِنَّ");
        assert_eq!(map.get(&2), Some(&ColorClass::Ghunnah));
    }

    #[test]
    fn madd_tabii_fatha_alef() {
        let map = classify_one("قَالَ");
        assert_eq!(map.get(&2), Some(&ColorClass::Madd2));
    }

    #[test]
    fn madd_cancelled_before_wasla_is_deleted() {
        // The yeh of في would be Madd2, but the following hamzat wasl
        // cancels it entirely.
        let map = classify_one("فِي ٱلْبَيْتِ");
        assert_eq!(map.get(&2), None);
        let map = classify_one("فِي دَارٍ");
        assert_eq!(map.get(&2), Some(&ColorClass::Madd2));
    }

    #[test]
    fn variant_rules_agree_on_muttasil() {
        // Alef + combining maddah + hamza (Madinah writes the maddah,
        // the IndoPak rule keys on the hamza alone).
        let text = "جَا\u{0653}ءَ";
        let madinah = classify(&[Line::content(text)], false).remove(0);
        let indopak = classify(&[Line::content(text)], true).remove(0);
        assert_eq!(madinah.get(&2), Some(&ColorClass::Madd46));
        assert_eq!(indopak.get(&2), Some(&ColorClass::Madd46));
    }

    #[test]
    fn superscript_alef_is_a_two_count_madd() {
        let map = classify_one("ٱلرَّحْمَٰنِ");
        // Dagger alef rides at offset 9.
        assert_eq!(map.get(&9), Some(&ColorClass::Madd2));
        // The article lam assimilates: silent, and the doubled ra is
        // heavy.
        assert_eq!(map.get(&1), Some(&ColorClass::Silent));
        assert_eq!(map.get(&2), Some(&ColorClass::HeavyLetter));
    }
}
