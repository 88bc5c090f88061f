//! Romaji to kana transliteration.
//!
//! Both operations scan left to right and take the longest known syllable
//! at each position.

mod table;

use unicode_normalization::UnicodeNormalization;

pub use table::RomajiTable;

/// e.g. kara -> から, karas -> からs
///
/// Characters that start no syllable are copied through unchanged.
pub fn convert(input: &str) -> String {
    let table = RomajiTable::global();
    let mut output = String::with_capacity(input.len() * 3);
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        match table.longest_match(rest) {
            Some((len, kana)) => {
                output.push_str(kana);
                rest = &rest[len..];
            }
            None => {
                output.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    output
}

/// Whether `input` splits entirely into known syllables, e.g. kara but not karas
pub fn is_fully_convertible(input: &str) -> bool {
    let table = RomajiTable::global();
    let mut rest = input;

    while !rest.is_empty() {
        match table.longest_match(rest) {
            Some((len, _)) => rest = &rest[len..],
            None => return false,
        }
    }

    true
}

/// Alternate kana search offered for a romaji query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub romaji: String,
    pub kana: String,
}

/// Kana suggestion for a typed query, if it reads as romaji
pub fn suggest(query: &str) -> Option<Suggestion> {
    let romaji = query.nfkc().collect::<String>().trim().to_lowercase();

    if romaji.is_empty() || !is_fully_convertible(&romaji) {
        return None;
    }

    let kana = convert(&romaji);
    if kana == romaji {
        return None;
    }

    Some(Suggestion { romaji, kana })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_basic_word() {
        assert_eq!(convert("kara"), "から");
        assert_eq!(convert("nihongo"), "にほんご");
        assert_eq!(convert("shashin"), "しゃしん");
    }

    #[test]
    fn convert_geminate_is_one_syllable() {
        assert_eq!(convert("kka"), "っか");
        assert_eq!(convert("kitte"), "きって");
        assert_eq!(convert("issho"), "いっしょ");
    }

    #[test]
    fn convert_long_vowel() {
        assert_eq!(convert("oo"), "おー");
        assert_eq!(convert("kaa"), "かあ");
    }

    #[test]
    fn convert_copies_unknown_characters() {
        assert_eq!(convert("karas"), "からs");
        assert_eq!(convert("zzz"), "zzz");
        assert_eq!(convert("日本go"), "日本ご");
        assert_eq!(convert("Kara"), "Kあら");
        assert_eq!(convert(""), "");
    }

    #[test]
    fn fully_convertible() {
        assert!(is_fully_convertible("kara"));
        assert!(is_fully_convertible("nihongo"));
        assert!(is_fully_convertible("kka"));
        assert!(is_fully_convertible(""));
    }

    #[test]
    fn not_fully_convertible() {
        assert!(!is_fully_convertible("karas"));
        assert!(!is_fully_convertible("zzz"));
        assert!(!is_fully_convertible("kara "));
        assert!(!is_fully_convertible("から"));
    }

    #[test]
    fn greedy_split_does_not_backtrack() {
        // "ny" only starts "nya"/"nyu"/"nyo", so "n" completes and "yx" is left
        assert!(!is_fully_convertible("nyx"));
        assert_eq!(convert("nyx"), "んyx");
    }

    #[test]
    fn suggestion_for_romaji() {
        let suggestion = suggest(" Kara ").unwrap();
        assert_eq!(suggestion.romaji, "kara");
        assert_eq!(suggestion.kana, "から");
    }

    #[test]
    fn suggestion_normalizes_fullwidth() {
        assert_eq!(suggest("ｋａｒａ").unwrap().kana, "から");
    }

    #[test]
    fn no_suggestion() {
        assert_eq!(suggest(""), None);
        assert_eq!(suggest("   "), None);
        assert_eq!(suggest("zzz"), None);
        assert_eq!(suggest("karas"), None);
        assert_eq!(suggest("日本語"), None);
    }
}
