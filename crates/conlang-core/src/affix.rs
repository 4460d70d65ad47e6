// Declension layers, affix rules and derivational affixes
//
// Language files store a part of speech's declension rules as a list of
// single-key objects: `{"suffix": [{"plural": {...affix...}}, ...]}`. The key
// of the outer object names the affix type and each inner object maps one
// declension label to its rule. `AffixLayer::from_raw` turns that shape into
// a tagged enum and reports any object that does not have exactly one key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConlangError, Result};

/// How a declension layer attaches to the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffixType {
    Prefix,
    Suffix,
    /// Regex substitution inside the word.
    Replacement,
    /// A free-standing particle; never produces a declined form.
    Particle,
}

impl AffixType {
    pub fn as_str(self) -> &'static str {
        match self {
            AffixType::Prefix => "prefix",
            AffixType::Suffix => "suffix",
            AffixType::Replacement => "replacement",
            AffixType::Particle => "particle",
        }
    }

    /// Parse the lowercase key used in language files.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "prefix" => Some(AffixType::Prefix),
            "suffix" => Some(AffixType::Suffix),
            "replacement" => Some(AffixType::Replacement),
            "particle" => Some(AffixType::Particle),
            _ => None,
        }
    }
}

impl fmt::Display for AffixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Affix rules
// ---------------------------------------------------------------------------

/// Pattern-gated affix strings.
///
/// When `pronunciation_regex` matches the word, the `t_` strings are used,
/// otherwise the `f_` strings. Replacement affixes substitute the `_repl`
/// strings for the pattern matches instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionalAffix {
    pub pronunciation_regex: Option<String>,
    pub spelling_regex: Option<String>,
    pub t_pronunciation_add: Option<String>,
    pub f_pronunciation_add: Option<String>,
    pub t_spelling_add: Option<String>,
    pub f_spelling_add: Option<String>,
    pub pronunciation_repl: Option<String>,
    pub spelling_repl: Option<String>,
}

/// A single affix rule.
///
/// Fixed and conditional shapes are mutually exclusive; a record carrying
/// fields of both is rejected on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAffix", into = "RawAffix")]
pub enum Affix {
    /// Unconditional strings to attach.
    Fixed {
        pronunciation_add: Option<String>,
        spelling_add: Option<String>,
    },
    Conditional(ConditionalAffix),
    /// No rule fields at all; the word is left unchanged.
    PassThrough,
}

impl Affix {
    /// Fixed affix attaching the same string to both representations.
    pub fn fixed(pronunciation_add: impl Into<String>, spelling_add: impl Into<String>) -> Self {
        Affix::Fixed {
            pronunciation_add: Some(pronunciation_add.into()),
            spelling_add: Some(spelling_add.into()),
        }
    }

    /// Conditional affix gated on a pronunciation pattern only.
    pub fn conditional(
        pronunciation_regex: impl Into<String>,
        t_pronunciation_add: impl Into<String>,
        f_pronunciation_add: impl Into<String>,
    ) -> Self {
        Affix::Conditional(ConditionalAffix {
            pronunciation_regex: Some(pronunciation_regex.into()),
            t_pronunciation_add: Some(t_pronunciation_add.into()),
            f_pronunciation_add: Some(f_pronunciation_add.into()),
            ..ConditionalAffix::default()
        })
    }

    /// Replacement affix substituting `repl` for matches of `pattern`.
    pub fn replacement(pattern: impl Into<String>, repl: impl Into<String>) -> Self {
        Affix::Conditional(ConditionalAffix {
            pronunciation_regex: Some(pattern.into()),
            pronunciation_repl: Some(repl.into()),
            ..ConditionalAffix::default()
        })
    }
}

/// Flat field layout of an affix as stored in language files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAffix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_pronunciation_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_pronunciation_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_spelling_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_spelling_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_repl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling_repl: Option<String>,
}

impl TryFrom<RawAffix> for Affix {
    type Error = ConlangError;

    fn try_from(raw: RawAffix) -> Result<Self> {
        let fixed = raw.pronunciation_add.is_some() || raw.spelling_add.is_some();
        let conditional = raw.pronunciation_regex.is_some()
            || raw.spelling_regex.is_some()
            || raw.t_pronunciation_add.is_some()
            || raw.f_pronunciation_add.is_some()
            || raw.t_spelling_add.is_some()
            || raw.f_spelling_add.is_some()
            || raw.pronunciation_repl.is_some()
            || raw.spelling_repl.is_some();

        match (fixed, conditional) {
            (true, true) => Err(ConlangError::ConflictingAffixShape(format!(
                "pronunciation_add={:?}, pronunciation_regex={:?}",
                raw.pronunciation_add, raw.pronunciation_regex
            ))),
            (true, false) => Ok(Affix::Fixed {
                pronunciation_add: raw.pronunciation_add,
                spelling_add: raw.spelling_add,
            }),
            (false, true) => Ok(Affix::Conditional(ConditionalAffix {
                pronunciation_regex: raw.pronunciation_regex,
                spelling_regex: raw.spelling_regex,
                t_pronunciation_add: raw.t_pronunciation_add,
                f_pronunciation_add: raw.f_pronunciation_add,
                t_spelling_add: raw.t_spelling_add,
                f_spelling_add: raw.f_spelling_add,
                pronunciation_repl: raw.pronunciation_repl,
                spelling_repl: raw.spelling_repl,
            })),
            (false, false) => Ok(Affix::PassThrough),
        }
    }
}

impl From<Affix> for RawAffix {
    fn from(affix: Affix) -> Self {
        match affix {
            Affix::Fixed {
                pronunciation_add,
                spelling_add,
            } => RawAffix {
                pronunciation_add,
                spelling_add,
                ..RawAffix::default()
            },
            Affix::Conditional(c) => RawAffix {
                pronunciation_regex: c.pronunciation_regex,
                spelling_regex: c.spelling_regex,
                t_pronunciation_add: c.t_pronunciation_add,
                f_pronunciation_add: c.f_pronunciation_add,
                t_spelling_add: c.t_spelling_add,
                f_spelling_add: c.f_spelling_add,
                pronunciation_repl: c.pronunciation_repl,
                spelling_repl: c.spelling_repl,
                ..RawAffix::default()
            },
            Affix::PassThrough => RawAffix::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Declension layers
// ---------------------------------------------------------------------------

/// One labeled alternative offered by a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declension {
    pub label: String,
    pub affix: Affix,
}

impl Declension {
    pub fn new(label: impl Into<String>, affix: Affix) -> Self {
        Self {
            label: label.into(),
            affix,
        }
    }
}

/// One step of a part of speech's declension pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffixLayer {
    Prefix(Vec<Declension>),
    Suffix(Vec<Declension>),
    Replacement(Vec<Declension>),
    Particle(Vec<Declension>),
}

/// Layer shape as stored in language files: `{affix_type: [{label: affix}]}`.
pub type RawAffixLayer = BTreeMap<String, Vec<BTreeMap<String, Affix>>>;

impl AffixLayer {
    pub fn new(affix_type: AffixType, declensions: Vec<Declension>) -> Self {
        match affix_type {
            AffixType::Prefix => AffixLayer::Prefix(declensions),
            AffixType::Suffix => AffixLayer::Suffix(declensions),
            AffixType::Replacement => AffixLayer::Replacement(declensions),
            AffixType::Particle => AffixLayer::Particle(declensions),
        }
    }

    pub fn affix_type(&self) -> AffixType {
        match self {
            AffixLayer::Prefix(_) => AffixType::Prefix,
            AffixLayer::Suffix(_) => AffixType::Suffix,
            AffixLayer::Replacement(_) => AffixType::Replacement,
            AffixLayer::Particle(_) => AffixType::Particle,
        }
    }

    pub fn declensions(&self) -> &[Declension] {
        match self {
            AffixLayer::Prefix(d)
            | AffixLayer::Suffix(d)
            | AffixLayer::Replacement(d)
            | AffixLayer::Particle(d) => d,
        }
    }

    /// Convert the file representation of layer `layer` of `part_of_speech`.
    ///
    /// Fails with [`ConlangError::StructuralMismatch`] when the layer object
    /// does not have exactly one known affix-type key, when a non-particle
    /// layer offers no declensions, or when a declension object does not have
    /// exactly one label.
    pub fn from_raw(part_of_speech: &str, layer: usize, raw: &RawAffixLayer) -> Result<Self> {
        let mismatch = |reason: String| ConlangError::StructuralMismatch {
            part_of_speech: part_of_speech.to_string(),
            layer,
            reason,
        };

        let mut entries = raw.iter();
        let (key, alternatives) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(mismatch(format!(
                    "expected exactly one affix type key, found {}",
                    raw.len()
                )));
            }
        };
        let affix_type =
            AffixType::parse(key).ok_or_else(|| mismatch(format!("unknown affix type `{key}`")))?;

        if alternatives.is_empty() && affix_type != AffixType::Particle {
            return Err(mismatch("empty declension list".to_string()));
        }

        let mut declensions = Vec::with_capacity(alternatives.len());
        for (i, alternative) in alternatives.iter().enumerate() {
            let mut items = alternative.iter();
            match (items.next(), items.next()) {
                (Some((label, affix)), None) => {
                    declensions.push(Declension::new(label.clone(), affix.clone()));
                }
                _ => {
                    return Err(mismatch(format!(
                        "declension {i} must have exactly one label, found {}",
                        alternative.len()
                    )));
                }
            }
        }

        Ok(AffixLayer::new(affix_type, declensions))
    }

    /// Convert back to the file representation.
    pub fn to_raw(&self) -> RawAffixLayer {
        let alternatives = self
            .declensions()
            .iter()
            .map(|d| BTreeMap::from([(d.label.clone(), d.affix.clone())]))
            .collect();
        BTreeMap::from([(self.affix_type().as_str().to_string(), alternatives)])
    }
}

// ---------------------------------------------------------------------------
// Derivational affixes
// ---------------------------------------------------------------------------

/// Attachment side of a derivational affix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DerivationType {
    Prefix,
    Suffix,
}

/// A named rule that derives a new word from an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationalAffix {
    #[serde(rename = "type")]
    pub derivation_type: DerivationType,
    #[serde(flatten)]
    pub affix: Affix,
}
