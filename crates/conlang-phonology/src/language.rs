// Language: top-level integration point for one conlang.
//
// Owns a `LanguageDescription` together with its compiled sound rules and
// the option structs for expansion and cluster extraction, and exposes the
// transduction, declension, derivation, cluster and sorting operations
// through one value.
//
// Design notes:
// - Sound rules are compiled once and recompiled whenever they are replaced,
//   so the stored rule list and its compiled form never disagree.
// - Options live on the handle and are passed down by reference.
// - Cluster rebuilding works on a scratch copy of the lexicon, so the
//   description is only touched once extraction has succeeded.

use conlang_core::Result;
use conlang_core::cluster::ClusterTable;
use conlang_core::language::LanguageDescription;
use conlang_core::lexicon::LexiconEntry;
use conlang_core::sound_rule::SoundRule;

use crate::clusters::{ClusterExtractor, ClusterOptions};
use crate::collation::{LexicalCollator, sort_lexicon_by_english};
use crate::expander::{ExpandedForm, ExpansionOptions, expand_affixes};
use crate::kirshenbaum::ipa_to_kirshenbaum;
use crate::lexicon;
use crate::transducer::CompiledSoundRules;

#[cfg(feature = "tracing")]
use tracing::debug;

/// A loaded language with compiled rules and processing options.
#[derive(Debug, Clone)]
pub struct Language {
    description: LanguageDescription,
    rules: CompiledSoundRules,

    // -- Options --
    expansion_options: ExpansionOptions,
    cluster_options: ClusterOptions,
}

impl Language {
    /// Wrap a description, compiling its sound rules.
    ///
    /// Fails with [`conlang_core::ConlangError::InvalidPattern`] if any rule
    /// pattern does not compile.
    pub fn new(description: LanguageDescription) -> Result<Self> {
        let rules = CompiledSoundRules::new(&description.sound_map_list)?;
        Ok(Self {
            description,
            rules,
            expansion_options: ExpansionOptions::default(),
            cluster_options: ClusterOptions::default(),
        })
    }

    pub fn description(&self) -> &LanguageDescription {
        &self.description
    }

    pub fn into_description(self) -> LanguageDescription {
        self.description
    }

    pub fn lexicon(&self) -> &[LexiconEntry] {
        &self.description.lexicon
    }

    pub fn phoneme_clusters(&self) -> &ClusterTable {
        &self.description.phoneme_clusters
    }

    // =========================================================================
    // Transduction
    // =========================================================================

    /// Spell a phonetic form with the language's sound rules.
    pub fn spell(&self, phonetic: &str) -> String {
        self.rules.spell(phonetic)
    }

    /// Pronounce a spelled word with the language's sound rules.
    pub fn sound_out(&self, word: &str) -> String {
        self.rules.sound_out(word)
    }

    /// Replace the sound rules. The old rules stay in place on error.
    pub fn set_sound_rules(&mut self, rules: Vec<SoundRule>) -> Result<()> {
        self.rules = CompiledSoundRules::new(&rules)?;
        self.description.sound_map_list = rules;
        Ok(())
    }

    /// Recompute every spelling from its pronunciation.
    pub fn respell_lexicon(&mut self) {
        for entry in &mut self.description.lexicon {
            entry.spelled = self.rules.spell(&entry.phonetic);
        }
    }

    /// Recompute every pronunciation from its spelling.
    pub fn repronounce_lexicon(&mut self) {
        for entry in &mut self.description.lexicon {
            entry.phonetic = self.rules.sound_out(&entry.spelled);
        }
    }

    /// Bracketed Kirshenbaum form of a phonetic word.
    pub fn kirshenbaum(&self, phonetic: &str) -> Result<String> {
        ipa_to_kirshenbaum(phonetic)
    }

    // =========================================================================
    // Declension and derivation
    // =========================================================================

    /// Every declined form of `phonetic` for a part of speech.
    pub fn expand(&self, phonetic: &str, part_of_speech: &str) -> Result<Vec<ExpandedForm>> {
        let layers = self.description.affix_layers(part_of_speech)?;
        expand_affixes(phonetic, part_of_speech, &layers, &self.expansion_options)
    }

    /// Declined entries for one entry, without adding them to the lexicon.
    pub fn decline(&self, entry: &LexiconEntry) -> Result<Vec<LexiconEntry>> {
        let layers = self.description.affix_layers(&entry.part_of_speech)?;
        lexicon::decline_word(entry, &layers, &self.rules, &self.expansion_options)
    }

    /// Derived entry for one entry and derivation key, without adding it to
    /// the lexicon. `None` when the key is unknown or the affix is empty.
    pub fn derive(&self, entry: &LexiconEntry, key: &str) -> Result<Option<LexiconEntry>> {
        let Some(derivation) = self.description.derivational_affix_map.get(key) else {
            return Ok(None);
        };
        lexicon::derive_word(entry, key, derivation, &self.rules, &self.expansion_options)
    }

    pub fn decline_lexicon(&mut self) -> Result<usize> {
        lexicon::decline_lexicon(&mut self.description, &self.expansion_options)
    }

    pub fn derive_lexicon(&mut self) -> Result<usize> {
        lexicon::derive_lexicon(&mut self.description, &self.expansion_options)
    }

    pub fn remove_declined_entries(&mut self) -> usize {
        lexicon::remove_declined_entries(&mut self.description)
    }

    pub fn remove_derived_entries(&mut self) -> usize {
        lexicon::remove_derived_entries(&mut self.description)
    }

    // =========================================================================
    // Phoneme clusters
    // =========================================================================

    /// Rebuild the phoneme cluster table from the whole lexicon.
    ///
    /// Does nothing for languages not written in IPA unless the `ipa_only`
    /// cluster option is off. Derived and declined forms are included: when
    /// the lexicon does not already hold them they are generated for the
    /// extraction and not kept. Returns the number of clusters in the table.
    pub fn rebuild_phoneme_clusters(&mut self) -> Result<usize> {
        if self.cluster_options.ipa_only && !self.description.is_ipa() {
            return Ok(self.description.phoneme_clusters.len());
        }

        let extractor = ClusterExtractor::with_options(
            &self.description.phonetic_inventory,
            &self.cluster_options,
        )?;

        let mut scratch = self.description.clone();
        if !scratch.derived {
            lexicon::derive_lexicon(&mut scratch, &self.expansion_options)?;
        }
        if !scratch.declined {
            lexicon::decline_lexicon(&mut scratch, &self.expansion_options)?;
        }

        let mut table = ClusterTable::new();
        extractor.extract_all(scratch.lexicon.iter().map(|e| e.phonetic.as_str()), &mut table);

        #[cfg(feature = "tracing")]
        debug!(
            words = scratch.lexicon.len(),
            clusters = table.len(),
            "rebuilt phoneme clusters"
        );

        self.description.phoneme_clusters = table;
        Ok(self.description.phoneme_clusters.len())
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Collator for the language's lexical order.
    pub fn collator(&self) -> LexicalCollator {
        LexicalCollator::new(&self.description.lexical_order_list)
    }

    /// Stable sort of the lexicon by spelled form.
    pub fn sort_lexicon_by_spelling(&mut self) {
        let collator = self.collator();
        collator.sort_by_spelling(&mut self.description.lexicon);
    }

    /// Stable sort of the lexicon by English gloss.
    pub fn sort_lexicon_by_english(&mut self) {
        sort_lexicon_by_english(&mut self.description.lexicon);
    }

    // =========================================================================
    // Option setters
    // =========================================================================

    /// Set whether generated forms keep a leading stress mark.
    pub fn set_restore_stress(&mut self, value: bool) {
        self.expansion_options.restore_stress = value;
    }

    /// Set the maximum number of affix layers per part of speech.
    pub fn set_max_layers(&mut self, value: Option<usize>) {
        self.expansion_options.max_layers = value;
    }

    /// Set the mask character used during cluster extraction.
    pub fn set_cluster_placeholder(&mut self, value: char) {
        self.cluster_options.placeholder = value;
    }

    /// Set whether cluster rebuilding is limited to IPA languages.
    pub fn set_ipa_only_clusters(&mut self, value: bool) {
        self.cluster_options.ipa_only = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conlang_core::ConlangError;
    use conlang_core::affix::{Affix, AffixLayer, Declension};
    use conlang_core::cluster::ClusterShape;
    use conlang_core::inventory::{PULMONIC_CONSONANTS, PhonemeInventory, VOWELS};
    use conlang_core::language::NOTATION_IPA;

    fn description() -> LanguageDescription {
        let mut d = LanguageDescription {
            phonetic_characters: NOTATION_IPA.to_string(),
            phonetic_inventory: PhonemeInventory::new()
                .with_category(VOWELS, ["a", "i"])
                .with_category(PULMONIC_CONSONANTS, ["k", "t", "s"]),
            sound_map_list: vec![
                SoundRule::new("k", "c", "k", "c"),
                SoundRule::new("", "", "ˈ", "^$"),
            ],
            lexical_order_list: ["a", "i", "k", "s", "t"].map(String::from).to_vec(),
            ..LanguageDescription::default()
        };
        d.set_affix_layers(
            "noun",
            &[AffixLayer::Suffix(vec![Declension::new(
                "pl",
                Affix::fixed("s", "s"),
            )])],
        );
        d.lexicon.push(LexiconEntry::new("ˈtaka", "taca", "road", "noun"));
        d.lexicon.push(LexiconEntry::new("ki", "ci", "fire", "noun"));
        d
    }

    #[test]
    fn invalid_rules_fail_construction() {
        let mut d = description();
        d.sound_map_list.push(SoundRule::new("a", "a", "(", "a"));
        assert!(matches!(
            Language::new(d),
            Err(ConlangError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn spell_and_sound_out() {
        let lang = Language::new(description()).unwrap();
        assert_eq!(lang.spell("ˈkita"), "cita");
        assert_eq!(lang.sound_out("cita"), "kita");
    }

    #[test]
    fn set_sound_rules_keeps_old_rules_on_error() {
        let mut lang = Language::new(description()).unwrap();
        let bad = vec![SoundRule::new("a", "a", "[", "a")];
        assert!(lang.set_sound_rules(bad).is_err());
        assert_eq!(lang.spell("ka"), "ca");
        assert_eq!(lang.description().sound_map_list.len(), 2);
    }

    #[test]
    fn expand_unknown_part_of_speech_is_empty() {
        let lang = Language::new(description()).unwrap();
        assert!(lang.expand("ka", "verb").unwrap().is_empty());
        assert_eq!(lang.expand("ka", "noun").unwrap().len(), 1);
    }

    #[test]
    fn rebuild_clusters_includes_declined_forms_temporarily() {
        let mut lang = Language::new(description()).unwrap();
        let count = lang.rebuild_phoneme_clusters().unwrap();
        let table = lang.phoneme_clusters();
        assert_eq!(table.get("ta"), Some(ClusterShape::ConsonantsVowel));
        assert_eq!(table.get("ka"), Some(ClusterShape::ConsonantsVowel));
        assert_eq!(table.get("ki"), Some(ClusterShape::ConsonantsVowel));
        assert_eq!(count, 3);
        assert_eq!(lang.lexicon().len(), 2);
        assert!(!lang.description().declined);
    }

    #[test]
    fn rebuild_clusters_skips_non_ipa() {
        let mut d = description();
        d.phonetic_characters = "x-sampa".to_string();
        d.phoneme_clusters.insert("zz", ClusterShape::VowelVowel);
        let mut lang = Language::new(d).unwrap();
        assert_eq!(lang.rebuild_phoneme_clusters().unwrap(), 1);
        assert!(lang.phoneme_clusters().contains("zz"));

        lang.set_ipa_only_clusters(false);
        lang.rebuild_phoneme_clusters().unwrap();
        assert!(!lang.phoneme_clusters().contains("zz"));
    }

    #[test]
    fn rebuild_clusters_keeps_existing_declined_entries() {
        let mut lang = Language::new(description()).unwrap();
        lang.decline_lexicon().unwrap();
        assert_eq!(lang.lexicon().len(), 4);
        lang.rebuild_phoneme_clusters().unwrap();
        assert_eq!(lang.lexicon().len(), 4);
        assert!(lang.description().declined);
    }

    #[test]
    fn sort_by_language_order() {
        let mut lang = Language::new(description()).unwrap();
        lang.sort_lexicon_by_spelling();
        let spelled: Vec<&str> = lang.lexicon().iter().map(|e| e.spelled.as_str()).collect();
        // "c" is not in the lexical order and sorts after every listed letter.
        assert_eq!(spelled, vec!["taca", "ci"]);

        lang.sort_lexicon_by_english();
        let glosses: Vec<&str> = lang.lexicon().iter().map(|e| e.english.as_str()).collect();
        assert_eq!(glosses, vec!["fire", "road"]);
    }

    #[test]
    fn restore_stress_option_reaches_declension() {
        let mut lang = Language::new(description()).unwrap();
        lang.set_restore_stress(true);
        let entry = lang.lexicon()[0].clone();
        let forms = lang.decline(&entry).unwrap();
        assert_eq!(forms[0].phonetic, "ˈtakas");
        assert_eq!(forms[0].spelled, "tacas");
    }

    #[test]
    fn max_layers_option_reaches_expansion() {
        let mut lang = Language::new(description()).unwrap();
        lang.set_max_layers(Some(0));
        assert!(matches!(
            lang.expand("ka", "noun"),
            Err(ConlangError::LayerLimitExceeded { .. })
        ));
    }

    #[test]
    fn derive_unknown_key_is_none() {
        let lang = Language::new(description()).unwrap();
        let entry = lang.lexicon()[0].clone();
        assert!(lang.derive(&entry, "missing").unwrap().is_none());
    }

    #[test]
    fn kirshenbaum_of_lexicon_word() {
        let lang = Language::new(description()).unwrap();
        assert_eq!(lang.kirshenbaum("ˈtaka").unwrap(), "[['taka]]");
    }
}
