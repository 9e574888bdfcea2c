//! Fixed Arabic letter vocabulary for mushaf text.
//!
//! These tables describe the specific letter/mark repertoire of Quranic
//! orthography (Madinah and IndoPak editions), not general Unicode.
//! Joining behavior here drives subword topology: a kashida may only be
//! inserted at a genuine letter-to-letter connection.

/// Lone hamza. Never joins in either direction, so it always forms a
/// one-letter subword.
pub const HAMZA: char = '\u{0621}';

/// Arabic end-of-ayah sign, wraps the verse number.
pub const END_OF_AYAH: char = '\u{06DD}';

/// Tatweel/kashida codepoint. Never produced by this engine (elongation
/// is done with stylistic-set features), but tolerated in input.
pub const TATWEEL: char = '\u{0640}';

/// Base letters: the joinable consonants and non-joining letters that
/// participate in subword topology. Diacritics and quranic annotation
/// marks are excluded.
pub fn is_base_letter(c: char) -> bool {
    matches!(c,
        '\u{0621}'..='\u{063A}'    // hamza..ghain
        | '\u{0641}'..='\u{064A}'  // feh..yeh
        | '\u{0671}'               // alef wasla
        | '\u{06A9}'               // keheh (IndoPak)
        | '\u{06BA}'               // noon ghunna (IndoPak)
        | '\u{06C1}'               // heh goal (IndoPak)
        | '\u{06CC}'               // farsi yeh (IndoPak)
        | '\u{06D2}'               // yeh barree (IndoPak)
    )
}

/// Letters that join only to the preceding (right-side) letter and can
/// never connect leftward. A subword ends after one of these when more
/// letters follow.
pub fn is_right_joining(c: char) -> bool {
    matches!(c,
        '\u{0622}' | '\u{0623}' | '\u{0624}' | '\u{0625}' | '\u{0627}' // alef family + waw-hamza
        | '\u{0629}'                                                   // teh marbuta
        | '\u{062F}' | '\u{0630}'                                      // dal, thal
        | '\u{0631}' | '\u{0632}'                                      // reh, zain
        | '\u{0648}'                                                   // waw
        | '\u{0671}'                                                   // alef wasla
        | '\u{06D2}'                                                   // yeh barree
    )
}

/// Harakat and quranic annotation marks that ride on a base letter.
pub fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}'
        | '\u{0670}'               // superscript alef
        | '\u{06D6}'..='\u{06DC}'  // small high ligatures / stop marks
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}' | '\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | '\u{08F0}'..='\u{08F2}'  // open tanween (Madinah orthography)
    )
}

/// Arabic-Indic and extended Arabic-Indic digits (verse numbers).
pub fn is_arabic_digit(c: char) -> bool {
    matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

/// Zero-width control characters that carry no outline of their own.
/// Their tajweed class inherits from the next visible cluster.
pub fn is_zero_width_control(c: char) -> bool {
    matches!(c, '\u{200C}' | '\u{200D}')
}

// Short vowels and related marks used by both the justification
// diacritic-boost rule and the tajweed engine.
pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';
pub const QURANIC_SUKUN: char = '\u{06E1}'; // small high dotless head of khah
pub const FATHATAN: char = '\u{064B}';
pub const DAMMATAN: char = '\u{064C}';
pub const KASRATAN: char = '\u{064D}';
pub const MADDAH: char = '\u{0653}';
pub const SUPERSCRIPT_ALEF: char = '\u{0670}';
pub const SMALL_HIGH_ROUND_ZERO: char = '\u{06DF}'; // silent-letter marker

pub fn is_short_vowel(c: char) -> bool {
    matches!(c, FATHA | DAMMA | KASRA)
}

pub fn is_tanween(c: char) -> bool {
    matches!(c, FATHATAN | DAMMATAN | KASRATAN | '\u{08F0}' | '\u{08F1}' | '\u{08F2}')
}

pub fn is_sukun(c: char) -> bool {
    matches!(c, SUKUN | QURANIC_SUKUN)
}

// Letters.
pub const ALEF: char = '\u{0627}';
pub const ALEF_WASLA: char = '\u{0671}';
pub const BEH: char = '\u{0628}';
pub const TEH_MARBUTA: char = '\u{0629}';
pub const TEH: char = '\u{062A}';
pub const JEEM: char = '\u{062C}';
pub const DAL: char = '\u{062F}';
pub const THAL: char = '\u{0630}';
pub const REH: char = '\u{0631}';
pub const ZAIN: char = '\u{0632}';
pub const SEEN: char = '\u{0633}';
pub const SAD: char = '\u{0635}';
pub const TAH: char = '\u{0637}';
pub const QAF: char = '\u{0642}';
pub const KAF: char = '\u{0643}';
pub const KEHEH: char = '\u{06A9}';
pub const LAM: char = '\u{0644}';
pub const MEEM: char = '\u{0645}';
pub const NOON: char = '\u{0646}';
pub const HEH: char = '\u{0647}';
pub const WAW: char = '\u{0648}';
pub const ALEF_MAKSURA: char = '\u{0649}';
pub const YEH: char = '\u{064A}';

/// Beh-group letters: identical connecting stroke, primary kashida
/// carriers in medial position.
pub fn is_beh_group(c: char) -> bool {
    matches!(c, '\u{0628}' | '\u{062A}' | '\u{062B}' | '\u{0626}' | '\u{0646}' | '\u{064A}' | '\u{06CC}')
}

/// Tall final letters that invite elongation of the preceding
/// connection (alef family, lam, kaf, tah, zah).
pub fn is_ascendant(c: char) -> bool {
    matches!(c,
        '\u{0622}' | '\u{0623}' | '\u{0625}' | '\u{0627}' | '\u{0671}'
        | '\u{0644}' | '\u{0643}' | '\u{06A9}' | '\u{0637}' | '\u{0638}'
    )
}

/// Seen-group letters (seen, sheen, sad, dad): their tooth row admits a
/// dedicated stretch.
pub fn is_seen_group(c: char) -> bool {
    matches!(c, '\u{0633}' | '\u{0634}' | '\u{0635}' | '\u{0636}')
}

/// Hah-group letters (jeem, hah, khah).
pub fn is_hah_group(c: char) -> bool {
    matches!(c, '\u{062C}' | '\u{062D}' | '\u{062E}')
}

pub fn is_reh_or_zain(c: char) -> bool {
    matches!(c, '\u{0631}' | '\u{0632}')
}

pub fn is_kaf(c: char) -> bool {
    matches!(c, '\u{0643}' | '\u{06A9}')
}

/// Final letters with a dedicated alternate (swash) form. Closed
/// five-letter class.
pub fn has_final_alternate(c: char) -> bool {
    matches!(c, '\u{0646}' | '\u{064A}' | '\u{0649}' | '\u{0633}' | '\u{0635}')
}

/// After lam, these letters must never be separated by a kashida: the
/// lam-X joins are fixed ligature territory in both conventions.
pub fn lam_forbids_stretch_before(c: char) -> bool {
    matches!(c, '\u{0643}' | '\u{06A9}' | '\u{062F}' | '\u{0630}' | '\u{0629}' | '\u{0647}')
}

/// Heavy (tafkhim) letters: خ ص ض غ ط ق ظ.
pub fn is_heavy_letter(c: char) -> bool {
    matches!(c, '\u{062E}' | '\u{0635}' | '\u{0636}' | '\u{063A}' | '\u{0637}' | '\u{0642}' | '\u{0638}')
}

/// Qalqalah letters: ق ط ب ج د.
pub fn is_qalqalah_letter(c: char) -> bool {
    matches!(c, '\u{0642}' | '\u{0637}' | '\u{0628}' | '\u{062C}' | '\u{062F}')
}

/// Ikhfa trigger letters (fifteen).
pub fn is_ikhfa_letter(c: char) -> bool {
    matches!(c,
        '\u{062A}' | '\u{062B}' | '\u{062C}' | '\u{062F}' | '\u{0630}'
        | '\u{0632}' | '\u{0633}' | '\u{0634}' | '\u{0635}' | '\u{0636}'
        | '\u{0637}' | '\u{0638}' | '\u{0641}' | '\u{0642}' | '\u{0643}'
        | '\u{06A9}'
    )
}

/// Idgham-with-ghunnah letters: ي ن م و.
pub fn is_idgham_ghunnah_letter(c: char) -> bool {
    matches!(c, '\u{064A}' | '\u{0646}' | '\u{0645}' | '\u{0648}' | '\u{06CC}')
}

/// Idgham-without-ghunnah letters: ل ر.
pub fn is_idgham_no_ghunnah_letter(c: char) -> bool {
    matches!(c, '\u{0644}' | '\u{0631}')
}

/// Madd (prolongation) letters.
pub fn is_madd_letter(c: char) -> bool {
    matches!(c, '\u{0627}' | '\u{0648}' | '\u{064A}' | '\u{0649}' | '\u{0671}' | '\u{06CC}')
}

/// Any hamza form, standalone or as a carrier mark. Kashida before or
/// after one is calligraphically forbidden.
pub fn is_hamza_form(c: char) -> bool {
    matches!(c, '\u{0621}' | '\u{0623}' | '\u{0624}' | '\u{0625}' | '\u{0626}' | '\u{0654}' | '\u{0655}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_letters_exclude_marks_and_digits() {
        assert!(is_base_letter('ب'));
        assert!(is_base_letter('ء'));
        assert!(is_base_letter(ALEF_WASLA));
        assert!(!is_base_letter(FATHA));
        assert!(!is_base_letter('٣'));
        assert!(!is_base_letter(' '));
        assert!(!is_base_letter(TATWEEL));
    }

    #[test]
    fn right_joining_set_is_the_non_connectors() {
        for c in ['ا', 'د', 'ذ', 'ر', 'ز', 'و', 'ة'] {
            assert!(is_right_joining(c), "{c} should not join leftward");
        }
        for c in ['ب', 'س', 'ل', 'ك', 'م', 'ه'] {
            assert!(!is_right_joining(c), "{c} joins both sides");
        }
    }

    #[test]
    fn heavy_letters_match_the_mnemonic() {
        let heavy: Vec<char> = "خصضغطقظ".chars().collect();
        for c in heavy {
            assert!(is_heavy_letter(c));
        }
        assert!(!is_heavy_letter('ب'));
    }

    #[test]
    fn qalqalah_letters_match_the_mnemonic() {
        for c in "قطبجد".chars() {
            assert!(is_qalqalah_letter(c));
        }
        assert!(!is_qalqalah_letter('س'));
    }
}
