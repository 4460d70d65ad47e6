// Bidirectional spelling/pronunciation rules

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single transduction rule between phonetic and spelled text.
///
/// `spelling_regex` matches phonetic text and is replaced with `romanization`
/// when spelling a word. `pronunciation_regex` matches spelled text and is
/// replaced with `phoneme` when sounding a word out. Replacement strings may
/// use `$n` group references.
///
/// Rule lists are applied in order, each rule seeing the output of the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundRule {
    #[serde(default)]
    pub phoneme: String,
    #[serde(default)]
    pub romanization: String,
    #[serde(default)]
    pub spelling_regex: String,
    #[serde(default)]
    pub pronunciation_regex: String,
}

impl SoundRule {
    pub fn new(
        phoneme: impl Into<String>,
        romanization: impl Into<String>,
        spelling_regex: impl Into<String>,
        pronunciation_regex: impl Into<String>,
    ) -> Self {
        Self {
            phoneme: phoneme.into(),
            romanization: romanization.into(),
            spelling_regex: spelling_regex.into(),
            pronunciation_regex: pronunciation_regex.into(),
        }
    }
}

impl fmt::Display for SoundRule {
    /// `pronunciation_regex -> phoneme; spelling_regex -> romanization`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}; {} -> {}",
            self.pronunciation_regex, self.phoneme, self.spelling_regex, self.romanization
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_both_directions() {
        let rule = SoundRule::new("ʃ", "sh", "ʃ", "sh");
        assert_eq!(rule.to_string(), "sh -> ʃ; ʃ -> sh");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let rule: SoundRule = serde_json::from_str(r#"{"phoneme": "a"}"#).unwrap();
        assert_eq!(rule.phoneme, "a");
        assert!(rule.romanization.is_empty());
        assert!(rule.spelling_regex.is_empty());
    }
}
