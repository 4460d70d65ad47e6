// Phoneme cluster extraction
//
// Builds one regex per cluster shape from a language's phoneme inventory and
// records every cluster found in a word under the first shape that matches
// it. Matched text is masked out of the word before the next shape runs, so a
// stretch of phonemes is counted once, under the highest-priority shape.

use regex::Regex;

use conlang_core::character::PhonemeUnit;
use conlang_core::cluster::{ClusterShape, ClusterTable};
use conlang_core::inventory::PhonemeInventory;
use conlang_core::{ConlangError, Result};

#[cfg(feature = "tracing")]
use tracing::trace;

/// Character substituted for matched clusters (U+FFFC OBJECT REPLACEMENT
/// CHARACTER).
pub const DEFAULT_PLACEHOLDER: char = '\u{FFFC}';

/// Configuration for cluster extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Mask written over matched clusters. Must not occur in the inventory.
    pub placeholder: char,
    /// Only rebuild cluster tables for languages written in IPA.
    pub ipa_only: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            ipa_only: true,
        }
    }
}

/// Compiled cluster patterns for one inventory.
#[derive(Debug, Clone)]
pub struct ClusterExtractor {
    patterns: Vec<(ClusterShape, Regex)>,
    placeholder: String,
}

impl ClusterExtractor {
    pub fn new(inventory: &PhonemeInventory) -> Result<Self> {
        Self::with_options(inventory, &ClusterOptions::default())
    }

    /// Build the patterns for `inventory`.
    ///
    /// Shapes that need a category the inventory lacks (no vowels, no
    /// diphthongs or no consonants) are left out.
    pub fn with_options(inventory: &PhonemeInventory, options: &ClusterOptions) -> Result<Self> {
        let vowel = class_fragment(inventory.vowels().iter());
        let consonant = class_fragment(inventory.consonants());
        let diphthong = alternation_fragment(inventory.diphthongs());

        let (v, c, d) = (vowel.as_deref(), consonant.as_deref(), diphthong.as_deref());
        let mut patterns = Vec::with_capacity(ClusterShape::PRIORITY.len());
        for shape in ClusterShape::PRIORITY {
            let pattern = match shape {
                ClusterShape::ConsonantsVowel => c.zip(v).map(|(c, v)| format!("{c}+{v}")),
                ClusterShape::ConsonantsDiphthong => c.zip(d).map(|(c, d)| format!("{c}+{d}")),
                ClusterShape::ConsonantsVowelConsonants => {
                    c.zip(v).map(|(c, v)| format!("{c}+{v}{c}+"))
                }
                ClusterShape::ConsonantsDiphthongConsonants => {
                    c.zip(d).map(|(c, d)| format!("{c}+{d}{c}+"))
                }
                ClusterShape::VowelConsonants => v.zip(c).map(|(v, c)| format!("{v}{c}+")),
                ClusterShape::DiphthongConsonants => d.zip(c).map(|(d, c)| format!("{d}{c}+")),
                ClusterShape::VowelVowel => v.map(|v| format!("{v}{{2}}")),
                ClusterShape::VowelDiphthong => v.zip(d).map(|(v, d)| format!("{v}{d}")),
                ClusterShape::DiphthongVowel => d.zip(v).map(|(d, v)| format!("{d}{v}")),
            };
            if let Some(pattern) = pattern {
                let regex = Regex::new(&pattern).map_err(|e| ConlangError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
                patterns.push((shape, regex));
            }
        }

        Ok(Self {
            patterns,
            placeholder: options.placeholder.to_string(),
        })
    }

    /// Shapes this extractor can recognize, in priority order.
    pub fn shapes(&self) -> impl Iterator<Item = ClusterShape> + '_ {
        self.patterns.iter().map(|(shape, _)| *shape)
    }

    /// Record the clusters of one word. Returns how many were new to `table`.
    pub fn extract(&self, word: &str, table: &mut ClusterTable) -> usize {
        let mut remaining = word.to_string();
        let mut added = 0;
        for (shape, regex) in &self.patterns {
            let found: Vec<String> = regex
                .find_iter(&remaining)
                .map(|m| m.as_str().to_string())
                .collect();
            for cluster in found {
                if table.insert(&cluster, *shape) {
                    #[cfg(feature = "tracing")]
                    trace!(cluster = %cluster, shape = %shape, word, "new phoneme cluster");
                    added += 1;
                }
                remaining = remaining.replace(&cluster, &self.placeholder);
            }
        }
        added
    }

    /// Record the clusters of every word. Returns how many were new.
    pub fn extract_all<'a, I>(&self, words: I, table: &mut ClusterTable) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        words.into_iter().map(|w| self.extract(w, table)).sum()
    }
}

/// `([bases][diacritics]?)` for single-character phonemes with an optional
/// combining diacritic. `None` when there are no phonemes.
fn class_fragment<'a>(phonemes: impl Iterator<Item = &'a String>) -> Option<String> {
    let mut bases: Vec<char> = Vec::new();
    let mut diacritics: Vec<char> = Vec::new();
    for unit in phonemes.filter_map(|p| PhonemeUnit::parse(p)) {
        if !bases.contains(&unit.base) {
            bases.push(unit.base);
        }
        if let Some(d) = unit.diacritic {
            if !diacritics.contains(&d) {
                diacritics.push(d);
            }
        }
    }
    if bases.is_empty() {
        return None;
    }

    let mut fragment = format!("([{}]", escape_class(&bases));
    if !diacritics.is_empty() {
        fragment.push_str(&format!("[{}]?", escape_class(&diacritics)));
    }
    fragment.push(')');
    Some(fragment)
}

/// `(d1|d2|...)` of literal diphthongs. `None` when there are none.
fn alternation_fragment(diphthongs: &[String]) -> Option<String> {
    let literals: Vec<String> = diphthongs
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| regex::escape(d))
        .collect();
    if literals.is_empty() {
        None
    } else {
        Some(format!("({})", literals.join("|")))
    }
}

fn escape_class(chars: &[char]) -> String {
    let mut buf = [0u8; 4];
    chars
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut buf)))
        .collect()
}
