// Language description: the serde-facing container for a conlang's data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::affix::{AffixLayer, DerivationalAffix, RawAffixLayer};
use crate::cluster::ClusterTable;
use crate::inventory::PhonemeInventory;
use crate::lexicon::LexiconEntry;
use crate::sound_rule::SoundRule;
use crate::Result;

/// Phonetic notation under which cluster extraction runs.
pub const NOTATION_IPA: &str = "ipa";

/// Everything the engine reads or writes about a single language.
///
/// Field names follow the conlang JSON layout. Fields the engine does not
/// model are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageDescription {
    #[serde(default)]
    pub english_name: String,
    #[serde(default)]
    pub native_name_phonetic: String,
    #[serde(default)]
    pub native_name_english: String,
    /// Notation of the `phonetic` fields, e.g. `"ipa"`.
    #[serde(default)]
    pub phonetic_characters: String,
    #[serde(default)]
    pub phonetic_inventory: PhonemeInventory,
    #[serde(default)]
    pub sound_map_list: Vec<SoundRule>,
    #[serde(default)]
    pub lexical_order_list: Vec<String>,
    #[serde(default)]
    pub affix_map: BTreeMap<String, Vec<RawAffixLayer>>,
    #[serde(default)]
    pub derivational_affix_map: BTreeMap<String, DerivationalAffix>,
    #[serde(default)]
    pub lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    pub phoneme_clusters: ClusterTable,
    /// Whether the lexicon currently holds derived entries.
    #[serde(default)]
    pub derived: bool,
    /// Whether the lexicon currently holds declined entries.
    #[serde(default)]
    pub declined: bool,
    /// Fields owned by other tools, such as `version` or `preferred_voices`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LanguageDescription {
    pub fn is_ipa(&self) -> bool {
        self.phonetic_characters == NOTATION_IPA
    }

    /// Typed affix layers for a part of speech.
    ///
    /// A part of speech without an entry in the affix map has no layers.
    pub fn affix_layers(&self, part_of_speech: &str) -> Result<Vec<AffixLayer>> {
        let Some(raw_layers) = self.affix_map.get(part_of_speech) else {
            return Ok(Vec::new());
        };
        raw_layers
            .iter()
            .enumerate()
            .map(|(i, raw)| AffixLayer::from_raw(part_of_speech, i, raw))
            .collect()
    }

    /// Replace the layers of a part of speech.
    pub fn set_affix_layers(&mut self, part_of_speech: &str, layers: &[AffixLayer]) {
        self.affix_map.insert(
            part_of_speech.to_string(),
            layers.iter().map(AffixLayer::to_raw).collect(),
        );
    }

    /// Remove a part of speech's layers and every lexicon entry using it.
    pub fn remove_part_of_speech(&mut self, part_of_speech: &str) {
        self.affix_map.remove(part_of_speech);
        self.lexicon.retain(|e| e.part_of_speech != part_of_speech);
    }
}
