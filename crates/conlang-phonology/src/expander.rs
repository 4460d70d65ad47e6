// Affix combination expansion
//
// Walks a part of speech's declension layers and produces every form
// reachable by applying a non-empty prefix of the layer list, choosing one
// alternative per layer. For layers L1..Ln with a1..an alternatives the
// output holds a1 + a1*a2 + ... + a1*...*an forms, so the cost grows
// exponentially with the number of layers. `ExpansionOptions::max_layers`
// bounds it.
//
// The traversal keeps an explicit stack of pending forms instead of
// recursing, so deep layer lists cannot exhaust the call stack.

use regex::Regex;

use conlang_core::affix::{Affix, AffixLayer, AffixType, ConditionalAffix};
use conlang_core::character::{PRIMARY_STRESS, strip_leading_stress};
use conlang_core::{ConlangError, Result};

use crate::transducer::{compile_pattern, compile_replacement};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Default upper bound on the number of layers a part of speech may have.
pub const DEFAULT_MAX_LAYERS: usize = 16;

/// Configuration for affix expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// When true, a primary stress mark stripped from a stressed word before
    /// prefixing or suffixing is put back at the front of the new form.
    /// When false (the default) the mark is dropped from generated forms.
    pub restore_stress: bool,

    /// Reject layer lists with more than this many layers before the first
    /// particle layer, before doing any work. `None` disables the check.
    pub max_layers: Option<usize>,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            restore_stress: false,
            max_layers: Some(DEFAULT_MAX_LAYERS),
        }
    }
}

/// A generated form and the declension labels applied to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedForm {
    pub phonetic: String,
    pub declensions: Vec<String>,
}

/// A layer with its conditional patterns and replacements compiled.
struct CompiledLayer<'a> {
    affix_type: AffixType,
    alternatives: Vec<Alternative<'a>>,
}

struct Alternative<'a> {
    label: &'a str,
    affix: &'a Affix,
    regex: Option<Regex>,
    replacement: Option<String>,
}

impl<'a> CompiledLayer<'a> {
    fn new(layer: &'a AffixLayer) -> Result<Self> {
        let alternatives = layer
            .declensions()
            .iter()
            .map(|d| {
                let (regex, replacement) = match &d.affix {
                    Affix::Conditional(ConditionalAffix {
                        pronunciation_regex: Some(pattern),
                        pronunciation_repl,
                        ..
                    }) => (
                        Some(compile_pattern(pattern)?),
                        pronunciation_repl.as_deref().map(compile_replacement),
                    ),
                    _ => (None, None),
                };
                Ok(Alternative {
                    label: d.label.as_str(),
                    affix: &d.affix,
                    regex,
                    replacement,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            affix_type: layer.affix_type(),
            alternatives,
        })
    }
}

/// A generated form waiting to be emitted and expanded further.
struct Pending {
    layer: usize,
    phonetic: String,
    declensions: Vec<String>,
}

/// Generate every declined form of `phonetic` for the given layers.
///
/// Forms are returned depth-first: each form is followed by the forms built
/// on top of it, and alternatives keep their declared order. An empty layer
/// list yields nothing, and a particle layer ends every branch that reaches
/// it. The uninflected word itself is never part of the output.
///
/// Conditional patterns are compiled up front, so a malformed pattern in any
/// layer before the first particle layer fails the whole call.
pub fn expand_affixes(
    phonetic: &str,
    part_of_speech: &str,
    layers: &[AffixLayer],
    options: &ExpansionOptions,
) -> Result<Vec<ExpandedForm>> {
    let reachable = layers
        .iter()
        .position(|l| l.affix_type() == AffixType::Particle)
        .unwrap_or(layers.len());
    if let Some(limit) = options.max_layers {
        if reachable > limit {
            return Err(ConlangError::LayerLimitExceeded {
                part_of_speech: part_of_speech.to_string(),
                layers: reachable,
                limit,
            });
        }
    }

    let compiled = layers[..reachable]
        .iter()
        .map(CompiledLayer::new)
        .collect::<Result<Vec<_>>>()?;

    let mut output = Vec::new();
    let Some(first) = compiled.first() else {
        return Ok(output);
    };

    let mut stack = Vec::new();
    push_alternatives(first, 0, phonetic, &[], options, &mut stack);

    while let Some(pending) = stack.pop() {
        let next = pending.layer + 1;
        if let Some(layer) = compiled.get(next) {
            push_alternatives(
                layer,
                next,
                &pending.phonetic,
                &pending.declensions,
                options,
                &mut stack,
            );
        }
        #[cfg(feature = "tracing")]
        trace!(form = %pending.phonetic, labels = ?pending.declensions, "generated form");
        output.push(ExpandedForm {
            phonetic: pending.phonetic,
            declensions: pending.declensions,
        });
    }

    #[cfg(feature = "tracing")]
    debug!(
        word = phonetic,
        part_of_speech,
        layers = layers.len(),
        forms = output.len(),
        "expanded affix layers"
    );

    Ok(output)
}

/// Apply every alternative of `layer` to `word` and push the results so that
/// the first alternative is popped first.
fn push_alternatives(
    layer: &CompiledLayer<'_>,
    index: usize,
    word: &str,
    labels: &[String],
    options: &ExpansionOptions,
    stack: &mut Vec<Pending>,
) {
    let stressed = word.starts_with(PRIMARY_STRESS);
    let stripped = strip_leading_stress(word);

    let start = stack.len();
    for alt in &layer.alternatives {
        let Some(form) = apply_affix(layer.affix_type, alt, word, stripped) else {
            continue;
        };
        let form = match form {
            Applied::Affixed(s) if stressed && options.restore_stress => {
                format!("{PRIMARY_STRESS}{s}")
            }
            Applied::Affixed(s) | Applied::Unchanged(s) => s,
        };
        let mut declensions = labels.to_vec();
        declensions.push(alt.label.to_string());
        stack.push(Pending {
            layer: index,
            phonetic: form,
            declensions,
        });
    }
    stack[start..].reverse();
}

/// Result of applying one alternative.
enum Applied {
    /// Built by attaching a string to the stress-stripped word.
    Affixed(String),
    /// Built from the original word (replacement or pass-through).
    Unchanged(String),
}

/// Apply one affix to a word's pronunciation.
///
/// `word` is the form as received and `stripped` the same form without its
/// leading stress mark. Pattern tests and replacements see `word`; prefixes
/// and suffixes attach to `stripped`. Returns `None` for a replacement affix
/// with no replacement string, which produces no form.
fn apply_affix(
    affix_type: AffixType,
    alt: &Alternative<'_>,
    word: &str,
    stripped: &str,
) -> Option<Applied> {
    match (alt.affix, alt.regex.as_ref()) {
        (Affix::Conditional(rule), Some(re)) => match affix_type {
            AffixType::Prefix | AffixType::Suffix => {
                let add = if re.is_match(word) {
                    rule.t_pronunciation_add.as_deref()
                } else {
                    rule.f_pronunciation_add.as_deref()
                }
                .unwrap_or("");
                Some(Applied::Affixed(attach(affix_type, add, stripped)))
            }
            AffixType::Replacement => alt.replacement.as_deref().map(|repl| {
                Applied::Unchanged(re.replace_all(word, repl).into_owned())
            }),
            AffixType::Particle => None,
        },
        (
            Affix::Fixed {
                pronunciation_add: Some(add),
                ..
            },
            _,
        ) => Some(Applied::Affixed(attach(affix_type, add, stripped))),
        _ => Some(Applied::Unchanged(word.to_string())),
    }
}

/// Prefixes go in front; every other layer type appends.
fn attach(affix_type: AffixType, add: &str, stem: &str) -> String {
    if affix_type == AffixType::Prefix {
        format!("{add}{stem}")
    } else {
        format!("{stem}{add}")
    }
}
