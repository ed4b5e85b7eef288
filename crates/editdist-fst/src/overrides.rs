// Override file parser: alphabet tokens, then explicit edit weights.
//
// File layout:
//
//   a
//   b<TAB>0.5            alphabet token with a penalty weight
//   @@                   section separator
//   a<TAB>b<TAB>0.3      substitution weight
//   a,b<TAB>b,a<TAB>0.2  swap weight
//
// Blank lines are ignored in both sections. The first weight given for a key
// wins; later duplicates are skipped.

use std::io::BufRead;

use crate::EditDistError;
use crate::symbols::{Alphabet, Symbol};
use crate::weights::{SwapKey, SwapTable, WeightTable};

/// Line separating the alphabet section from the weight section.
pub const SECTION_SEPARATOR: &str = "@@";

/// Everything read from an override file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub alphabet: Alphabet,
    pub substitutions: WeightTable,
    pub swaps: SwapTable,
}

/// Read and parse an override file.
///
/// `epsilon` is the literal that denotes the empty symbol in weight lines.
pub fn read_overrides<R: BufRead>(reader: R, epsilon: &str) -> Result<Overrides, EditDistError> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    parse_overrides(lines.as_slice(), epsilon)
}

/// Parse override lines (without their line terminators).
pub fn parse_overrides<S: AsRef<str>>(
    lines: &[S],
    epsilon: &str,
) -> Result<Overrides, EditDistError> {
    let mut overrides = Overrides::default();
    let mut in_weights = false;

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if !in_weights {
            if line == SECTION_SEPARATOR {
                in_weights = true;
            } else {
                parse_alphabet_line(&mut overrides.alphabet, line, line_no, epsilon)?;
            }
            continue;
        }
        parse_weight_line(&mut overrides, line, line_no, epsilon)?;
    }

    Ok(overrides)
}

fn parse_alphabet_line(
    alphabet: &mut Alphabet,
    line: &str,
    line_no: usize,
    epsilon: &str,
) -> Result<(), EditDistError> {
    let (token, penalty) = match line.split_once('\t') {
        Some((token, weight)) => (token, parse_weight(weight, line_no)?),
        None => (line, 0.0),
    };
    alphabet.insert(Symbol::from_token(token, epsilon), penalty);
    Ok(())
}

fn parse_weight_line(
    overrides: &mut Overrides,
    line: &str,
    line_no: usize,
    epsilon: &str,
) -> Result<(), EditDistError> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [from, to, weight] = fields[..] else {
        return Err(EditDistError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    };
    let weight = parse_weight(weight, line_no)?;

    if from.contains(',') {
        let input = split_swap_side(from, line_no, epsilon)?;
        let output = split_swap_side(to, line_no, epsilon)?;
        overrides
            .swaps
            .insert_if_absent(SwapKey { input, output }, weight);
    } else {
        overrides.substitutions.insert_if_absent(
            Symbol::from_token(from, epsilon),
            Symbol::from_token(to, epsilon),
            weight,
        );
    }
    Ok(())
}

fn split_swap_side(
    side: &str,
    line_no: usize,
    epsilon: &str,
) -> Result<(Symbol, Symbol), EditDistError> {
    let parts: Vec<&str> = side.split(',').collect();
    match parts[..] {
        [a, b] => Ok((Symbol::from_token(a, epsilon), Symbol::from_token(b, epsilon))),
        _ => Err(EditDistError::SwapFormat {
            line: line_no,
            side: side.to_string(),
        }),
    }
}

// Weights must be finite and non-negative; adding 0.0 turns -0 into 0.
fn parse_weight(text: &str, line_no: usize) -> Result<f64, EditDistError> {
    match text.trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight + 0.0),
        _ => Err(EditDistError::InvalidWeight {
            line: line_no,
            value: text.to_string(),
        }),
    }
}
