// Ordered regex-chain transduction between phonetic and spelled text
//
// A rule list is a pipeline, not a rule set: each rule rewrites the output of
// the previous one, so a later rule can match text an earlier rule produced.

use regex::Regex;

use conlang_core::sound_rule::SoundRule;
use conlang_core::{ConlangError, Result};

/// Compile a user-supplied pattern.
///
/// Empty patterns are rejected: an empty regex matches at every position and
/// would splice the replacement between every character.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(ConlangError::InvalidPattern {
            pattern: String::new(),
            reason: "empty pattern".to_string(),
        });
    }
    Regex::new(pattern).map_err(|e| ConlangError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Rewrite a replacement string so numbered group references end where their
/// digits end.
///
/// `regex` reads `$1h` as a reference to a group named `1h`; rule authors
/// mean group 1 followed by `h`. Such references become `${1}h`. `$$` stays a
/// literal dollar sign.
pub(crate) fn compile_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len() + 4);
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                out.push_str("$$");
                chars.next();
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    digits.push(d);
                }
                let joins_name = chars
                    .peek()
                    .is_some_and(|n| n.is_alphanumeric() || *n == '_');
                if joins_name {
                    out.push_str(&format!("${{{digits}}}"));
                } else {
                    out.push('$');
                    out.push_str(&digits);
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Convert a phonetic form to its spelling.
///
/// Each rule's `spelling_regex` is replaced by its `romanization` across the
/// whole current string, in list order.
pub fn spell(phonetic: &str, rules: &[SoundRule]) -> Result<String> {
    let mut spelled = phonetic.to_string();
    for rule in rules {
        let re = compile_pattern(&rule.spelling_regex)?;
        let replacement = compile_replacement(&rule.romanization);
        spelled = re.replace_all(&spelled, replacement.as_str()).into_owned();
    }
    Ok(spelled)
}

/// Convert a spelled word to its phonetic form.
///
/// Each rule's `pronunciation_regex` is replaced by its `phoneme` across the
/// whole current string, in list order.
pub fn sound_out(word: &str, rules: &[SoundRule]) -> Result<String> {
    let mut phonetic = word.to_string();
    for rule in rules {
        let re = compile_pattern(&rule.pronunciation_regex)?;
        let replacement = compile_replacement(&rule.phoneme);
        phonetic = re.replace_all(&phonetic, replacement.as_str()).into_owned();
    }
    Ok(phonetic)
}

/// A rule list compiled once for repeated use over a whole lexicon.
///
/// Produces the same output as [`spell`] and [`sound_out`].
#[derive(Debug, Clone)]
pub struct CompiledSoundRules {
    spelling: Vec<(Regex, String)>,
    pronunciation: Vec<(Regex, String)>,
}

impl CompiledSoundRules {
    /// Compile both directions of every rule.
    pub fn new(rules: &[SoundRule]) -> Result<Self> {
        let mut spelling = Vec::with_capacity(rules.len());
        let mut pronunciation = Vec::with_capacity(rules.len());
        for rule in rules {
            spelling.push((
                compile_pattern(&rule.spelling_regex)?,
                compile_replacement(&rule.romanization),
            ));
            pronunciation.push((
                compile_pattern(&rule.pronunciation_regex)?,
                compile_replacement(&rule.phoneme),
            ));
        }
        Ok(Self {
            spelling,
            pronunciation,
        })
    }

    pub fn spell(&self, phonetic: &str) -> String {
        apply_chain(&self.spelling, phonetic)
    }

    pub fn sound_out(&self, word: &str) -> String {
        apply_chain(&self.pronunciation, word)
    }

    pub fn len(&self) -> usize {
        self.spelling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spelling.is_empty()
    }
}

fn apply_chain(chain: &[(Regex, String)], input: &str) -> String {
    let mut current = input.to_string();
    for (re, replacement) in chain {
        current = re.replace_all(&current, replacement.as_str()).into_owned();
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<SoundRule> {
        vec![
            SoundRule::new("ʃ", "sh", "ʃ", "sh"),
            SoundRule::new("k", "c", "k", "c"),
            SoundRule::new("", "", "ˈ", "^$"),
        ]
    }

    #[test]
    fn spell_applies_rules_in_order() {
        assert_eq!(spell("ˈʃaka", &rules()).unwrap(), "shaca");
    }

    #[test]
    fn sound_out_applies_rules_in_order() {
        assert_eq!(sound_out("shaca", &rules()).unwrap(), "ʃaka");
    }

    #[test]
    fn later_rule_sees_earlier_output() {
        // The second rule rewrites text produced by the first.
        let chain = vec![
            SoundRule::new("", "x", "a", "_"),
            SoundRule::new("", "y", "x", "_"),
        ];
        assert_eq!(spell("aba", &chain).unwrap(), "yby");
    }

    #[test]
    fn empty_rule_list_is_identity() {
        assert_eq!(spell("ˈkata", &[]).unwrap(), "ˈkata");
        assert_eq!(sound_out("cata", &[]).unwrap(), "cata");
    }

    #[test]
    fn deterministic() {
        let r = rules();
        let first = spell("ʃakaʃ", &r).unwrap();
        for _ in 0..10 {
            assert_eq!(spell("ʃakaʃ", &r).unwrap(), first);
        }
    }

    #[test]
    fn roundtrip_is_not_guaranteed() {
        // Both /k/ and /s/ spell as "c", but "c" only sounds out as /k/.
        let lossy = vec![
            SoundRule::new("k", "c", "k", "c"),
            SoundRule::new("s", "c", "s", "^$"),
        ];
        let spelled = spell("sak", &lossy).unwrap();
        assert_eq!(spelled, "cac");
        assert_eq!(sound_out(&spelled, &lossy).unwrap(), "kak");
    }

    #[test]
    fn group_references_in_replacement() {
        let chain = vec![SoundRule::new("$1$1", "${1}h", "([td])ʰ", "([td])h")];
        assert_eq!(spell("tʰa", &chain).unwrap(), "tha");
        assert_eq!(sound_out("tha", &chain).unwrap(), "tta");
    }

    #[test]
    fn group_reference_followed_by_letter() {
        let chain = vec![SoundRule::new("$1", "$1h", "(t)", "(t)h")];
        assert_eq!(spell("ata", &chain).unwrap(), "atha");
        let compiled = CompiledSoundRules::new(&chain).unwrap();
        assert_eq!(compiled.spell("ata"), "atha");
    }

    #[test]
    fn replacement_reference_forms() {
        assert_eq!(compile_replacement("$1h"), "${1}h");
        assert_eq!(compile_replacement("$12_x"), "${12}_x");
        assert_eq!(compile_replacement("$1-$2"), "$1-$2");
        assert_eq!(compile_replacement("${1}h"), "${1}h");
        assert_eq!(compile_replacement("$$1h"), "$$1h");
        assert_eq!(compile_replacement("$name"), "$name");
        assert_eq!(compile_replacement("a$"), "a$");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let chain = vec![SoundRule::new("a", "a", "(", "a")];
        match spell("a", &chain) {
            Err(ConlangError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "("),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_pattern_is_reported() {
        let chain = vec![SoundRule::new("a", "a", "a", "")];
        assert!(matches!(
            sound_out("a", &chain),
            Err(ConlangError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn compiled_matches_uncompiled() {
        let r = rules();
        let compiled = CompiledSoundRules::new(&r).unwrap();
        for word in ["ˈʃaka", "kaʃ", "aaa", ""] {
            assert_eq!(compiled.spell(word), spell(word, &r).unwrap());
        }
        for word in ["shaca", "cash"] {
            assert_eq!(compiled.sound_out(word), sound_out(word, &r).unwrap());
        }
        assert_eq!(compiled.len(), 3);
    }

    #[test]
    fn compiled_rejects_bad_rule() {
        let chain = vec![SoundRule::new("a", "a", "a", "[")];
        assert!(CompiledSoundRules::new(&chain).is_err());
    }
}
