// Phoneme inventory categories

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inventory category holding monophthong vowels.
pub const VOWELS: &str = "vowels";
/// Inventory category holding vowel diphthongs.
pub const VOWEL_DIPHTHONGS: &str = "v_diphthongs";
/// Inventory category holding pulmonic consonants.
pub const PULMONIC_CONSONANTS: &str = "p_consonants";
/// Inventory category holding non-pulmonic consonants.
pub const NON_PULMONIC_CONSONANTS: &str = "np_consonants";

/// Phonemes used by a language, grouped by category name.
///
/// Each phoneme is one or two code points: a base character optionally
/// followed by a combining diacritic. Categories keep their declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhonemeInventory {
    categories: BTreeMap<String, Vec<String>>,
}

impl PhonemeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a whole category.
    pub fn with_category<I, S>(mut self, name: &str, phonemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(name, phonemes);
        self
    }

    /// Replace the phonemes of a category.
    pub fn set<I, S>(&mut self, name: &str, phonemes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .insert(name.to_string(), phonemes.into_iter().map(Into::into).collect());
    }

    /// Phonemes of a category, empty when the category is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.categories.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vowels(&self) -> &[String] {
        self.get(VOWELS)
    }

    pub fn diphthongs(&self) -> &[String] {
        self.get(VOWEL_DIPHTHONGS)
    }

    /// Pulmonic consonants followed by non-pulmonic consonants.
    pub fn consonants(&self) -> impl Iterator<Item = &String> {
        self.get(PULMONIC_CONSONANTS)
            .iter()
            .chain(self.get(NON_PULMONIC_CONSONANTS))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}
