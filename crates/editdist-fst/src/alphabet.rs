// Alphabet extraction from an optimized-lookup transducer file.

use std::io::Read;

use tracing::{debug, warn};

use crate::EditDistError;
use crate::format::{self, TransducerHeader};
use crate::symbols::{Alphabet, Symbol};

/// Symbols read from the symbol table of a binary transducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAlphabet {
    pub header: TransducerHeader,
    /// Single-character symbols, in file order.
    pub symbols: Vec<String>,
    /// Table entries that were not exactly one character long (epsilon,
    /// flag diacritics, multichar tags) or not valid UTF-8, in file order.
    /// Invalid bytes are shown as U+FFFD.
    pub dropped: Vec<String>,
}

impl BinaryAlphabet {
    /// Alphabet of the kept symbols, all with penalty 0.0.
    pub fn to_alphabet(&self) -> Alphabet {
        let mut alphabet = Alphabet::new();
        for s in &self.symbols {
            alphabet.insert(Symbol::literal(s.as_str()), 0.0);
        }
        alphabet
    }
}

/// Read a whole transducer from `reader` and extract its alphabet.
pub fn read_binary_alphabet<R: Read>(mut reader: R) -> Result<BinaryAlphabet, EditDistError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    parse_binary_alphabet(&data)
}

/// Parse the header and the `symbol_count` NUL-terminated strings following it.
pub fn parse_binary_alphabet(data: &[u8]) -> Result<BinaryAlphabet, EditDistError> {
    let (header, mut pos) = format::parse_header(data)?;
    debug!(
        symbols = header.symbol_count,
        input_symbols = header.input_symbol_count,
        states = header.state_count,
        transitions = header.transition_count,
        "read transducer header"
    );

    let count = header.symbol_count as usize;
    let mut symbols = Vec::with_capacity(count);
    let mut dropped = Vec::new();

    for _ in 0..count {
        let rest = &data[pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(EditDistError::TooShort {
                expected: data.len() + 1,
                actual: data.len(),
            })?;
        let bytes = &rest[..len];
        pos += len + 1;

        match std::str::from_utf8(bytes) {
            Ok(text) if text.chars().count() == 1 => symbols.push(text.to_string()),
            Ok(text) => {
                warn!(symbol = %text, "dropping symbol that is not a single character");
                dropped.push(text.to_string());
            }
            Err(_) => {
                let text = String::from_utf8_lossy(bytes).into_owned();
                warn!(symbol = %text, "dropping symbol that is not valid UTF-8");
                dropped.push(text);
            }
        }
    }

    Ok(BinaryAlphabet {
        header,
        symbols,
        dropped,
    })
}
