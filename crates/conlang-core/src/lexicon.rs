// Lexicon entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key listing the derivation rules that apply to a base entry.
pub const METADATA_DERIVATIONS: &str = "derivations";

/// A word in a language's lexicon.
///
/// Base entries have empty `declensions`. Entries generated by declension or
/// derivation carry the labels that were applied, in order, and set
/// `declined_word` or `derived_word` so they can be purged before the next
/// regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub phonetic: String,
    #[serde(default)]
    pub spelled: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub declensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_word: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declined_word: Option<bool>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl LexiconEntry {
    pub fn new(
        phonetic: impl Into<String>,
        spelled: impl Into<String>,
        english: impl Into<String>,
        part_of_speech: impl Into<String>,
    ) -> Self {
        Self {
            phonetic: phonetic.into(),
            spelled: spelled.into(),
            english: english.into(),
            part_of_speech: part_of_speech.into(),
            ..Self::default()
        }
    }

    pub fn is_declined(&self) -> bool {
        self.declined_word == Some(true)
    }

    pub fn is_derived(&self) -> bool {
        self.derived_word == Some(true)
    }

    /// Neither declined nor derived.
    pub fn is_base(&self) -> bool {
        !self.is_declined() && !self.is_derived()
    }

    /// Derivation keys listed under `metadata["derivations"]`.
    ///
    /// Non-string array items are ignored.
    pub fn derivation_keys(&self) -> Vec<&str> {
        match self.metadata.get(METADATA_DERIVATIONS) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
