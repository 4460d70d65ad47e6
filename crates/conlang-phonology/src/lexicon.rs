// Lexicon-wide operations: declension, derivation, purge and respelling
//
// Generated entries are appended to the lexicon with `declined_word` or
// `derived_word` set, so the lexicon can always be brought back to its base
// entries. Every operation here computes its results before touching the
// lexicon, so an error leaves the language unchanged.

use std::collections::BTreeMap;

use regex::Regex;

use conlang_core::Result;
use conlang_core::affix::{Affix, AffixLayer, DerivationType, DerivationalAffix};
use conlang_core::character::{PRIMARY_STRESS, strip_leading_stress};
use conlang_core::language::LanguageDescription;
use conlang_core::lexicon::{LexiconEntry, METADATA_DERIVATIONS};
use conlang_core::sound_rule::SoundRule;

use crate::expander::{ExpansionOptions, expand_affixes};
use crate::transducer::{CompiledSoundRules, compile_pattern};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Declension
// ---------------------------------------------------------------------------

/// Build declined entries for one base entry.
///
/// Each generated form is spelled with `rules`; gloss, part of speech and
/// metadata are copied from `entry`.
pub fn decline_word(
    entry: &LexiconEntry,
    layers: &[AffixLayer],
    rules: &CompiledSoundRules,
    options: &ExpansionOptions,
) -> Result<Vec<LexiconEntry>> {
    let forms = expand_affixes(&entry.phonetic, &entry.part_of_speech, layers, options)?;
    Ok(forms
        .into_iter()
        .map(|form| LexiconEntry {
            spelled: rules.spell(&form.phonetic),
            phonetic: form.phonetic,
            english: entry.english.clone(),
            part_of_speech: entry.part_of_speech.clone(),
            declensions: form.declensions,
            derived_word: None,
            declined_word: Some(true),
            metadata: entry.metadata.clone(),
        })
        .collect())
}

/// Append declined forms of every base entry and mark the language declined.
///
/// Entries whose part of speech has no affix layers contribute nothing.
/// Returns the number of entries added.
pub fn decline_lexicon(
    language: &mut LanguageDescription,
    options: &ExpansionOptions,
) -> Result<usize> {
    let rules = CompiledSoundRules::new(&language.sound_map_list)?;
    let mut layers_by_pos: BTreeMap<&str, Vec<AffixLayer>> = BTreeMap::new();
    let mut added = Vec::new();

    for entry in language.lexicon.iter().filter(|e| e.is_base()) {
        let pos = entry.part_of_speech.as_str();
        if !layers_by_pos.contains_key(pos) {
            layers_by_pos.insert(pos, language.affix_layers(pos)?);
        }
        let layers = &layers_by_pos[pos];
        if layers.is_empty() {
            continue;
        }
        added.extend(decline_word(entry, layers, &rules, options)?);
    }

    let count = added.len();
    language.lexicon.extend(added);
    language.declined = true;

    #[cfg(feature = "tracing")]
    debug!(added = count, "declined lexicon");

    Ok(count)
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Apply a named derivational affix to an entry.
///
/// The pronunciation is built from the affix's pronunciation strings. The
/// spelling comes from its spelling strings applied to the entry's spelled
/// form; when the affix has none, the new pronunciation is spelled with
/// `rules` instead. Returns `None` for an affix with no rule fields.
pub fn derive_word(
    entry: &LexiconEntry,
    key: &str,
    derivation: &DerivationalAffix,
    rules: &CompiledSoundRules,
    options: &ExpansionOptions,
) -> Result<Option<LexiconEntry>> {
    let stressed = entry.phonetic.starts_with(PRIMARY_STRESS);
    let stem = strip_leading_stress(&entry.phonetic);
    let side = derivation.derivation_type;

    let (pronunciation_add, spelling_add) = match &derivation.affix {
        Affix::PassThrough => return Ok(None),
        Affix::Fixed {
            pronunciation_add,
            spelling_add,
        } => (
            pronunciation_add.clone().unwrap_or_default(),
            spelling_add.clone(),
        ),
        Affix::Conditional(rule) => {
            let pronunciation_add = choose(
                rule.pronunciation_regex.as_deref(),
                &entry.phonetic,
                rule.t_pronunciation_add.as_deref(),
                rule.f_pronunciation_add.as_deref(),
            )?
            .unwrap_or_default();
            let spelling_add = choose(
                rule.spelling_regex.as_deref(),
                &entry.spelled,
                rule.t_spelling_add.as_deref(),
                rule.f_spelling_add.as_deref(),
            )?;
            (pronunciation_add, spelling_add)
        }
    };

    let mut phonetic = attach(side, &pronunciation_add, stem);
    if stressed && options.restore_stress {
        phonetic.insert(0, PRIMARY_STRESS);
    }
    let spelled = match spelling_add {
        Some(add) => attach(side, &add, &entry.spelled),
        None => rules.spell(&phonetic),
    };

    let mut metadata = entry.metadata.clone();
    metadata.remove(METADATA_DERIVATIONS);

    Ok(Some(LexiconEntry {
        phonetic,
        spelled,
        english: entry.english.clone(),
        part_of_speech: entry.part_of_speech.clone(),
        declensions: vec![key.to_string()],
        derived_word: Some(true),
        declined_word: None,
        metadata,
    }))
}

/// Append derived forms of every base entry and mark the language derived.
///
/// Each base entry is derived once per key listed in its
/// `metadata["derivations"]`. Keys missing from the language's
/// derivational affix map are skipped. Returns the number of entries added.
pub fn derive_lexicon(
    language: &mut LanguageDescription,
    options: &ExpansionOptions,
) -> Result<usize> {
    let rules = CompiledSoundRules::new(&language.sound_map_list)?;
    let mut added = Vec::new();

    for entry in language.lexicon.iter().filter(|e| e.is_base()) {
        for key in entry.derivation_keys() {
            let Some(derivation) = language.derivational_affix_map.get(key) else {
                #[cfg(feature = "tracing")]
                warn!(key, word = %entry.phonetic, "unknown derivation key");
                continue;
            };
            if let Some(derived) = derive_word(entry, key, derivation, &rules, options)? {
                added.push(derived);
            }
        }
    }

    let count = added.len();
    language.lexicon.extend(added);
    language.derived = true;

    #[cfg(feature = "tracing")]
    debug!(added = count, "derived lexicon");

    Ok(count)
}

/// Pick the true or false string depending on whether `pattern` matches
/// `text`. Without a pattern the false string is used.
fn choose(
    pattern: Option<&str>,
    text: &str,
    if_match: Option<&str>,
    otherwise: Option<&str>,
) -> Result<Option<String>> {
    let matched = match pattern {
        Some(p) => compile_pattern(p).map(|re: Regex| re.is_match(text))?,
        None => false,
    };
    let chosen = if matched { if_match } else { otherwise };
    Ok(chosen.map(str::to_string))
}

fn attach(side: DerivationType, add: &str, stem: &str) -> String {
    match side {
        DerivationType::Prefix => format!("{add}{stem}"),
        DerivationType::Suffix => format!("{stem}{add}"),
    }
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

/// Remove every declined entry and clear the language's declined flag.
/// Returns the number of entries removed.
pub fn remove_declined_entries(language: &mut LanguageDescription) -> usize {
    let before = language.lexicon.len();
    language.lexicon.retain(|e| !e.is_declined());
    language.declined = false;
    before - language.lexicon.len()
}

/// Remove every derived entry and clear the language's derived flag.
/// Returns the number of entries removed.
pub fn remove_derived_entries(language: &mut LanguageDescription) -> usize {
    let before = language.lexicon.len();
    language.lexicon.retain(|e| !e.is_derived());
    language.derived = false;
    before - language.lexicon.len()
}

// ---------------------------------------------------------------------------
// Respelling
// ---------------------------------------------------------------------------

/// Recompute every entry's spelling from its pronunciation.
pub fn respell_lexicon(lexicon: &mut [LexiconEntry], rules: &[SoundRule]) -> Result<()> {
    let compiled = CompiledSoundRules::new(rules)?;
    for entry in lexicon {
        entry.spelled = compiled.spell(&entry.phonetic);
    }
    Ok(())
}

/// Recompute every entry's pronunciation from its spelling.
pub fn repronounce_lexicon(lexicon: &mut [LexiconEntry], rules: &[SoundRule]) -> Result<()> {
    let compiled = CompiledSoundRules::new(rules)?;
    for entry in lexicon {
        entry.phonetic = compiled.sound_out(&entry.spelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conlang_core::ConlangError;
    use conlang_core::affix::{ConditionalAffix, Declension};

    fn rules() -> Vec<SoundRule> {
        vec![
            SoundRule::new("k", "c", "k", "c"),
            SoundRule::new("", "", "ˈ", "^$"),
        ]
    }

    fn language() -> LanguageDescription {
        let mut lang = LanguageDescription {
            sound_map_list: rules(),
            ..LanguageDescription::default()
        };
        lang.set_affix_layers(
            "noun",
            &[AffixLayer::Suffix(vec![
                Declension::new("sg", Affix::fixed("a", "a")),
                Declension::new("pl", Affix::fixed("i", "i")),
            ])],
        );
        lang.lexicon.push(LexiconEntry::new("ˈkat", "cat", "house", "noun"));
        lang.lexicon.push(LexiconEntry::new("ko", "co", "and", "conjunction"));
        lang
    }

    fn agent_suffix() -> DerivationalAffix {
        DerivationalAffix {
            derivation_type: DerivationType::Suffix,
            affix: Affix::fixed("ist", "ist"),
        }
    }

    #[test]
    fn decline_word_spells_each_form() {
        let lang = language();
        let compiled = CompiledSoundRules::new(&lang.sound_map_list).unwrap();
        let layers = lang.affix_layers("noun").unwrap();
        let forms = decline_word(
            &lang.lexicon[0],
            &layers,
            &compiled,
            &ExpansionOptions::default(),
        )
        .unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].phonetic, "kata");
        assert_eq!(forms[0].spelled, "cata");
        assert_eq!(forms[0].declensions, vec!["sg"]);
        assert_eq!(forms[1].spelled, "cati");
        assert!(forms.iter().all(|f| f.is_declined() && f.english == "house"));
    }

    #[test]
    fn decline_lexicon_appends_and_marks() {
        let mut lang = language();
        let added = decline_lexicon(&mut lang, &ExpansionOptions::default()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(lang.lexicon.len(), 4);
        assert!(lang.declined);
    }

    #[test]
    fn decline_skips_generated_entries() {
        let mut lang = language();
        decline_lexicon(&mut lang, &ExpansionOptions::default()).unwrap();
        let added = decline_lexicon(&mut lang, &ExpansionOptions::default()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(lang.lexicon.len(), 6);
    }

    #[test]
    fn decline_error_leaves_lexicon_unchanged() {
        let mut lang = language();
        lang.set_affix_layers(
            "noun",
            &[AffixLayer::Suffix(vec![Declension::new(
                "bad",
                Affix::conditional("(", "a", "b"),
            )])],
        );
        let result = decline_lexicon(&mut lang, &ExpansionOptions::default());
        assert!(matches!(result, Err(ConlangError::InvalidPattern { .. })));
        assert_eq!(lang.lexicon.len(), 2);
        assert!(!lang.declined);
    }

    #[test]
    fn remove_declined_restores_base_lexicon() {
        let mut lang = language();
        let base = lang.lexicon.clone();
        decline_lexicon(&mut lang, &ExpansionOptions::default()).unwrap();
        assert_eq!(remove_declined_entries(&mut lang), 2);
        assert_eq!(lang.lexicon, base);
        assert!(!lang.declined);
    }

    #[test]
    fn derive_word_with_fixed_affix() {
        let lang = language();
        let compiled = CompiledSoundRules::new(&lang.sound_map_list).unwrap();
        let derived = derive_word(
            &lang.lexicon[0],
            "agent",
            &agent_suffix(),
            &compiled,
            &ExpansionOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(derived.phonetic, "katist");
        assert_eq!(derived.spelled, "catist");
        assert_eq!(derived.declensions, vec!["agent"]);
        assert!(derived.is_derived());
    }

    #[test]
    fn derive_word_conditional_spelling() {
        let lang = language();
        let compiled = CompiledSoundRules::new(&lang.sound_map_list).unwrap();
        let prefix = DerivationalAffix {
            derivation_type: DerivationType::Prefix,
            affix: Affix::Conditional(ConditionalAffix {
                pronunciation_regex: Some("^ˈ?k".to_string()),
                t_pronunciation_add: Some("u".to_string()),
                f_pronunciation_add: Some("o".to_string()),
                spelling_regex: Some("^c".to_string()),
                t_spelling_add: Some("w".to_string()),
                f_spelling_add: Some("o".to_string()),
                ..ConditionalAffix::default()
            }),
        };
        let derived = derive_word(
            &lang.lexicon[0],
            "nominal",
            &prefix,
            &compiled,
            &ExpansionOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(derived.phonetic, "ukat");
        assert_eq!(derived.spelled, "wcat");
    }

    #[test]
    fn derive_word_spells_when_affix_has_no_spelling() {
        let lang = language();
        let compiled = CompiledSoundRules::new(&lang.sound_map_list).unwrap();
        let affix = DerivationalAffix {
            derivation_type: DerivationType::Suffix,
            affix: Affix::Fixed {
                pronunciation_add: Some("ka".to_string()),
                spelling_add: None,
            },
        };
        let derived = derive_word(
            &lang.lexicon[0],
            "dim",
            &affix,
            &compiled,
            &ExpansionOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(derived.spelled, "catca");
    }

    #[test]
    fn derive_pass_through_produces_nothing() {
        let lang = language();
        let compiled = CompiledSoundRules::new(&lang.sound_map_list).unwrap();
        let affix = DerivationalAffix {
            derivation_type: DerivationType::Suffix,
            affix: Affix::PassThrough,
        };
        let derived = derive_word(
            &lang.lexicon[0],
            "none",
            &affix,
            &compiled,
            &ExpansionOptions::default(),
        )
        .unwrap();
        assert!(derived.is_none());
    }

    #[test]
    fn derive_lexicon_uses_metadata_keys() {
        let mut lang = language();
        lang.derivational_affix_map
            .insert("agent".to_string(), agent_suffix());
        lang.lexicon[0].metadata.insert(
            METADATA_DERIVATIONS.to_string(),
            serde_json::json!(["agent", "unknown"]),
        );
        let added = derive_lexicon(&mut lang, &ExpansionOptions::default()).unwrap();
        assert_eq!(added, 1);
        assert!(lang.derived);
        let derived = &lang.lexicon[2];
        assert_eq!(derived.phonetic, "katist");
        assert!(derived.derivation_keys().is_empty());

        assert_eq!(remove_derived_entries(&mut lang), 1);
        assert_eq!(lang.lexicon.len(), 2);
        assert!(!lang.derived);
    }

    #[test]
    fn respell_and_repronounce() {
        let mut lexicon = vec![LexiconEntry::new("ˈkok", "", "x", "noun")];
        respell_lexicon(&mut lexicon, &rules()).unwrap();
        assert_eq!(lexicon[0].spelled, "coc");
        repronounce_lexicon(&mut lexicon, &rules()).unwrap();
        assert_eq!(lexicon[0].phonetic, "kok");
    }
}
