//! Phonology and morphology algorithms for constructed languages.
//!
//! Operates on the data model from `conlang-core`: converts between
//! pronunciation and spelling, generates declined and derived word forms,
//! extracts syllable-cluster shapes from a lexicon and orders words by a
//! language's own alphabet.
//!
//! # Architecture
//!
//! - [`transducer`] -- Ordered regex-chain spelling and pronunciation
//! - [`expander`] -- Affix layer expansion (explicit DFS stack)
//! - [`clusters`] -- Phoneme cluster extraction
//! - [`collation`] -- Alphabet-driven sort keys and lexicon sorting
//! - [`lexicon`] -- Lexicon-wide declension, derivation and purge
//! - [`kirshenbaum`] -- IPA to Kirshenbaum transliteration
//! - [`combinatorics`] -- Permutations and combinations
//! - [`language`] -- The `Language` handle tying the above together
//!
//! Enable the `tracing` feature to emit `tracing` events from expansion,
//! cluster extraction and lexicon rebuilds.

pub mod clusters;
pub mod collation;
pub mod combinatorics;
pub mod expander;
pub mod kirshenbaum;
pub mod language;
pub mod lexicon;
pub mod transducer;

pub use clusters::{ClusterExtractor, ClusterOptions};
pub use collation::LexicalCollator;
pub use expander::{ExpandedForm, ExpansionOptions, expand_affixes};
pub use language::Language;
pub use transducer::{CompiledSoundRules, sound_out, spell};

pub use conlang_core::{ConlangError, Result};
