// IPA character classification and phoneme-unit utilities

// ---------------------------------------------------------------------------
// Suprasegmental marks
// ---------------------------------------------------------------------------

/// IPA primary stress mark (U+02C8).
pub const PRIMARY_STRESS: char = '\u{02C8}';

/// IPA secondary stress mark (U+02CC).
pub const SECONDARY_STRESS: char = '\u{02CC}';

/// First code point of the Combining Diacritical Marks block.
pub const COMBINING_DIACRITIC_FIRST: char = '\u{0300}';

/// Last code point of the Combining Diacritical Marks block.
pub const COMBINING_DIACRITIC_LAST: char = '\u{036F}';

/// Check whether a character is a combining diacritic (U+0300..=U+036F).
pub fn is_combining_diacritic(c: char) -> bool {
    (COMBINING_DIACRITIC_FIRST..=COMBINING_DIACRITIC_LAST).contains(&c)
}

/// Remove a single leading primary stress mark, if present.
///
/// Only one mark is removed; a second mark (or a stress mark elsewhere in the
/// word) is left alone.
pub fn strip_leading_stress(word: &str) -> &str {
    word.strip_prefix(PRIMARY_STRESS).unwrap_or(word)
}

// ---------------------------------------------------------------------------
// Phoneme units
// ---------------------------------------------------------------------------

/// A phoneme split into its base character and optional combining diacritic.
///
/// Inventory phonemes are one or two code points long. Longer strings keep
/// only the first two; the rest is not representable in a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhonemeUnit {
    pub base: char,
    pub diacritic: Option<char>,
}

impl PhonemeUnit {
    /// Split a phoneme string. Returns `None` for an empty string.
    pub fn parse(phoneme: &str) -> Option<Self> {
        let mut chars = phoneme.chars();
        let base = chars.next()?;
        Some(Self {
            base,
            diacritic: chars.next(),
        })
    }
}

/// Lowercase a string one character at a time, keeping a one-to-one mapping.
///
/// Characters with multi-character lowercase expansions keep only the first
/// character, so positions in the output line up with the input.
pub fn simple_lowercase(word: &str) -> String {
    word.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}
