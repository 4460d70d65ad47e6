// Alphabet-driven lexical ordering
//
// A word's sort key is a weighted sum over its characters: the first unit
// is worth its alphabet value, the second a tenth of it, and so on. The
// alphabet is a language's own ordering of base characters, which rarely
// matches code point order.

use std::cmp::Ordering;

use hashbrown::HashMap;

use conlang_core::character::{
    COMBINING_DIACRITIC_FIRST, COMBINING_DIACRITIC_LAST, PRIMARY_STRESS, is_combining_diacritic,
    simple_lowercase,
};
use conlang_core::lexicon::LexiconEntry;

/// Weight of one alphabet step.
const STEP: f64 = 100.0;

/// Computes collation keys for one alphabet.
#[derive(Debug, Clone)]
pub struct LexicalCollator {
    positions: HashMap<char, usize>,
    unmapped: f64,
}

impl LexicalCollator {
    /// Build a collator from an ordered list of single-character entries.
    ///
    /// Entries that are not exactly one character never match a base
    /// character and only count toward the alphabet length. When a
    /// character is listed twice its first position is used.
    pub fn new<S: AsRef<str>>(order: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(order.len());
        for (i, entry) in order.iter().enumerate() {
            let mut chars = entry.as_ref().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                positions.entry(c).or_insert(i);
            }
        }
        Self {
            positions,
            unmapped: (order.len() + 1) as f64 * STEP,
        }
    }

    /// Value of a single unit before positional weighting.
    fn unit_value(&self, base: char, diacritic: Option<char>) -> f64 {
        let Some(&index) = self.positions.get(&base) else {
            return self.unmapped;
        };
        let mut value = index as f64 * STEP;
        if let Some(d) = diacritic {
            let span = (COMBINING_DIACRITIC_LAST as u32 - COMBINING_DIACRITIC_FIRST as u32) as f64;
            value += ((d as u32 - COMBINING_DIACRITIC_FIRST as u32) as f64 / span).round();
        }
        value
    }

    /// Sort key for a word.
    ///
    /// The word is lowercased and scanned left to right. A character
    /// followed by a combining diacritic is read together with it, except
    /// within the last two characters of the word. Primary stress marks and
    /// spaces carry no weight and do not advance the position.
    pub fn key(&self, word: &str) -> f64 {
        let chars: Vec<char> = simple_lowercase(word).chars().collect();
        let mut key = 0.0;
        let mut pos = 0;
        let mut position: i32 = 0;

        while pos < chars.len() {
            let base = chars[pos];
            let diacritic = if pos + 2 < chars.len() && is_combining_diacritic(chars[pos + 1]) {
                pos += 2;
                Some(chars[pos - 1])
            } else {
                pos += 1;
                None
            };

            if diacritic.is_none() && (base == PRIMARY_STRESS || base == ' ') {
                continue;
            }
            key += self.unit_value(base, diacritic) * 10f64.powi(-position);
            position += 1;
        }
        key
    }

    /// Compare two words by their keys.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).total_cmp(&self.key(b))
    }

    /// Compare two entries by their spelled forms.
    pub fn compare_spelling(&self, a: &LexiconEntry, b: &LexiconEntry) -> Ordering {
        self.compare(&a.spelled, &b.spelled)
    }

    /// Stable sort by spelled form. Keys are computed once per entry.
    pub fn sort_by_spelling(&self, entries: &mut Vec<LexiconEntry>) {
        let mut keyed: Vec<(f64, LexiconEntry)> = entries
            .drain(..)
            .map(|e| (self.key(&e.spelled), e))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        entries.extend(keyed.into_iter().map(|(_, e)| e));
    }
}

/// Case-insensitive comparison of English glosses.
pub fn compare_english(a: &LexiconEntry, b: &LexiconEntry) -> Ordering {
    a.english
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.english.chars().flat_map(char::to_lowercase))
}

/// Stable sort of a lexicon by spelled form under `order`.
pub fn sort_lexicon_by_spelling<S: AsRef<str>>(lexicon: &mut Vec<LexiconEntry>, order: &[S]) {
    LexicalCollator::new(order).sort_by_spelling(lexicon);
}

/// Stable sort of a lexicon by English gloss, ignoring case.
pub fn sort_lexicon_by_english(lexicon: &mut [LexiconEntry]) {
    lexicon.sort_by(compare_english);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(spelled: &str, english: &str) -> LexiconEntry {
        LexiconEntry::new(spelled, spelled, english, "noun")
    }

    #[test]
    fn alphabet_order_with_unmapped_last() {
        let c = LexicalCollator::new(&["a", "b", "c"]);
        assert!(c.key("a") < c.key("b"));
        assert!(c.key("b") < c.key("c"));
        assert!(c.key("c") < c.key("z"));
        assert_eq!(c.key("z"), c.key("q"));
    }

    #[test]
    fn alphabet_overrides_code_point_order() {
        let c = LexicalCollator::new(&["t", "k", "a"]);
        assert_eq!(c.compare("ta", "ka"), Ordering::Less);
        assert_eq!(c.compare("ak", "at"), Ordering::Greater);
    }

    #[test]
    fn earlier_units_dominate() {
        let c = LexicalCollator::new(&["a", "b", "c"]);
        assert!(c.key("ac") < c.key("b"));
        assert!(c.key("ba") < c.key("bb"));
    }

    #[test]
    fn stress_and_spaces_are_ignored() {
        let c = LexicalCollator::new(&["a", "k", "t"]);
        assert_eq!(c.key("ˈkat"), c.key("kat"));
        assert_eq!(c.key("ka t"), c.key("kat"));
        assert_eq!(c.key("ˈ "), 0.0);
    }

    #[test]
    fn case_is_ignored() {
        let c = LexicalCollator::new(&["a", "k", "t"]);
        assert_eq!(c.key("KaT"), c.key("kat"));
    }

    #[test]
    fn diacritic_joins_base() {
        let c = LexicalCollator::new(&["a", "e", "k"]);
        // Low combining marks round down, high ones up.
        assert_eq!(c.key("ke\u{0301}a"), c.key("kea"));
        assert!(c.key("ke\u{036F}a") > c.key("kea"));
        assert!(c.key("ke\u{036F}a") < c.key("kka"));
    }

    #[test]
    fn diacritic_near_end_is_separate() {
        let c = LexicalCollator::new(&["a", "e", "k"]);
        // The mark is read alone and counts as an unmapped character.
        let expected = c.key("ke") + 4.0 * STEP * 0.01;
        assert!((c.key("ke\u{0301}") - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_word_has_zero_key() {
        let c = LexicalCollator::new(&["a"]);
        assert_eq!(c.key(""), 0.0);
    }

    #[test]
    fn empty_alphabet_ties_everything() {
        let c = LexicalCollator::new::<&str>(&[]);
        assert_eq!(c.key("a"), c.key("b"));
    }

    #[test]
    fn spelling_sort_is_stable() {
        let mut lexicon = vec![
            entry("ta", "first"),
            entry("ka", "second"),
            entry("ta", "third"),
            entry("a", "fourth"),
        ];
        sort_lexicon_by_spelling(&mut lexicon, &["a", "k", "t"]);
        let glosses: Vec<&str> = lexicon.iter().map(|e| e.english.as_str()).collect();
        assert_eq!(glosses, vec!["fourth", "second", "first", "third"]);
    }

    #[test]
    fn english_sort_ignores_case() {
        let mut lexicon = vec![
            entry("a", "banana"),
            entry("b", "Apple"),
            entry("c", "cherry"),
            entry("d", "apple"),
        ];
        sort_lexicon_by_english(&mut lexicon);
        let spelled: Vec<&str> = lexicon.iter().map(|e| e.spelled.as_str()).collect();
        assert_eq!(spelled, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn compare_spelling_uses_spelled_field() {
        let c = LexicalCollator::new(&["a", "b"]);
        let mut x = entry("b", "x");
        x.phonetic = "a".to_string();
        let y = entry("a", "y");
        assert_eq!(c.compare_spelling(&x, &y), Ordering::Greater);
    }
}
