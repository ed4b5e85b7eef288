//! Edit-distance transducer generator.
//!
//! This crate builds a weighted finite-state transducer that accepts pairs of
//! strings within a bounded (weighted) edit distance of each other, and writes
//! it as an AT&T-format transition table for a downstream FST compiler.
//!
//! # Architecture
//!
//! - [`symbols`] -- Symbol tagged union and the [`Alphabet`] with penalty weights
//! - [`format`] -- Binary optimized-lookup header parsing
//! - [`alphabet`] -- Reading an alphabet out of a binary transducer file
//! - [`overrides`] -- Parser for the textual alphabet / weight override file
//! - [`weights`] -- Substitution and swap weight tables, default-weight resolution
//! - [`builder`] -- State layout and transition emission
//! - [`att`] -- AT&T text rendering of the emitted lines
//! - [`options`] -- Generation options (epsilon literal, distance, swaps)

pub mod alphabet;
pub mod att;
pub mod builder;
pub mod format;
pub mod options;
pub mod overrides;
pub mod symbols;
pub mod weights;

pub use builder::EditTransducer;
pub use options::EditDistanceOptions;
pub use overrides::Overrides;
pub use symbols::{Alphabet, Symbol};

/// Error type for alphabet decoding, override parsing and generation.
#[derive(Debug, thiserror::Error)]
pub enum EditDistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("line {line}: expected 3 tab-separated fields, got {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: swap side {side:?} must have exactly two comma-separated symbols")]
    SwapFormat { line: usize, side: String },
    #[error("line {line}: invalid weight {value:?}")]
    InvalidWeight { line: usize, value: String },
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("no alphabet given: supply a literal alphabet, an override file or a binary transducer")]
    NoAlphabet,
}

/// Resolve all weights and build the transducer in one pass.
///
/// `overrides` carries the explicit substitution and swap weights read from
/// an override file (or [`Overrides::default`] when there is none).
pub fn generate(
    alphabet: &Alphabet,
    overrides: &Overrides,
    options: &EditDistanceOptions,
) -> Result<EditTransducer, EditDistError> {
    options.validate()?;
    if alphabet.is_empty() {
        return Err(EditDistError::NoAlphabet);
    }
    let resolved = weights::resolve(alphabet, overrides, options.swaps);
    builder::build(alphabet, &resolved, options)
}
