//! Shared types for the conlang phonology and morphology engine.
//!
//! This crate holds the language data model consumed by `conlang-phonology`
//! together with the error type every engine operation returns.
//!
//! # Architecture
//!
//! - [`character`] -- IPA marks and combining-diacritic handling
//! - [`sound_rule`] -- Bidirectional spelling/pronunciation rules
//! - [`affix`] -- Declension layers, affix rules and derivational affixes
//! - [`inventory`] -- Phoneme inventory categories
//! - [`cluster`] -- Cluster shape labels and the cluster table
//! - [`lexicon`] -- Lexicon entries
//! - [`language`] -- The serde-facing language description

pub mod affix;
pub mod character;
pub mod cluster;
pub mod inventory;
pub mod language;
pub mod lexicon;
pub mod sound_rule;

/// Error type for every engine operation.
///
/// Errors are returned to the immediate caller; nothing in the engine logs,
/// retries or reports them on its own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConlangError {
    /// A spelling, pronunciation or affix pattern is empty or malformed.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A phoneme has no entry in a fixed symbol map and is not declared unmapped.
    #[error("no mapping for phoneme `{phoneme}` in `{word}`")]
    MissingMapping { phoneme: String, word: String },

    /// Affix-layer data does not have the expected one-key shape.
    #[error("malformed affix layer {layer} for part of speech `{part_of_speech}`: {reason}")]
    StructuralMismatch {
        part_of_speech: String,
        layer: usize,
        reason: String,
    },

    /// An affix record carries both fixed and conditional fields.
    #[error("affix mixes fixed and conditional fields: {0}")]
    ConflictingAffixShape(String),

    /// A part of speech has more affix layers than the configured limit.
    #[error("part of speech `{part_of_speech}` has {layers} affix layers, limit is {limit}")]
    LayerLimitExceeded {
        part_of_speech: String,
        layers: usize,
        limit: usize,
    },
}

/// Result alias using [`ConlangError`].
pub type Result<T, E = ConlangError> = std::result::Result<T, E>;
