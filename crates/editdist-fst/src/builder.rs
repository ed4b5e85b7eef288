// State layout and transition emission.
//
// States 0..=distance form the main chain; state 0 is initial and 1..=distance
// are final. Every edit moves one step down the chain. Swap states are
// numbered from distance + 1 upwards, one per (chain state, swap) pair, and
// carry exactly one incoming and one outgoing transition.

use tracing::debug;

use crate::EditDistError;
use crate::options::EditDistanceOptions;
use crate::symbols::{Alphabet, Symbol};
use crate::weights::ResolvedWeights;

/// A weighted arc `source -> target` reading `input` and writing `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub source: u32,
    pub target: u32,
    pub input: Symbol,
    pub output: Symbol,
    pub weight: f64,
}

/// One line of the emitted table.
#[derive(Debug, Clone, PartialEq)]
pub enum AttLine {
    Transition(Transition),
    Final { state: u32, weight: f64 },
}

/// Generated edit-distance transducer, lines in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTransducer {
    lines: Vec<AttLine>,
    epsilon: String,
    state_count: u32,
    transition_count: usize,
}

impl EditTransducer {
    pub fn lines(&self) -> &[AttLine] {
        &self.lines
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.lines.iter().filter_map(|line| match line {
            AttLine::Transition(t) => Some(t),
            AttLine::Final { .. } => None,
        })
    }

    pub fn final_states(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.iter().filter_map(|line| match line {
            AttLine::Final { state, .. } => Some(*state),
            AttLine::Transition(_) => None,
        })
    }

    /// Main chain plus swap states.
    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    /// Number of transition lines (final-state lines excluded).
    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    /// ATT spelling of epsilon used when rendering.
    pub fn epsilon(&self) -> &str {
        &self.epsilon
    }
}

/// Lay out the transducer for `options.distance` edits.
///
/// For each chain state `s` in order: the final marker of `s + 1`, identity
/// loops on `s` for every alphabet symbol, one `s -> s + 1` arc per entry of
/// the substitution table, then (with swaps on) a two-arc detour through a
/// fresh swap state per swap entry.
///
/// Fails with [`EditDistError::InvalidOption`] when the state numbers would
/// not fit in a `u32`.
pub fn build(
    alphabet: &Alphabet,
    weights: &ResolvedWeights,
    options: &EditDistanceOptions,
) -> Result<EditTransducer, EditDistError> {
    let distance = options.distance;
    let mut lines = Vec::new();
    let mut transition_count = 0;
    let mut next_swap_state = next_state(distance)?;

    let mut push = |lines: &mut Vec<AttLine>, t: Transition| {
        lines.push(AttLine::Transition(t));
        transition_count += 1;
    };

    for state in 0..distance {
        lines.push(AttLine::Final {
            state: state + 1,
            weight: 0.0,
        });

        for sym in alphabet.symbols() {
            push(
                &mut lines,
                Transition {
                    source: state,
                    target: state,
                    input: sym.clone(),
                    output: sym.clone(),
                    weight: 0.0,
                },
            );
        }

        for (from, to, weight) in weights.substitutions.iter() {
            push(
                &mut lines,
                Transition {
                    source: state,
                    target: state + 1,
                    input: from.clone(),
                    output: to.clone(),
                    weight,
                },
            );
        }

        if options.swaps {
            for (key, weight) in weights.swaps.iter() {
                let swap_state = next_swap_state;
                next_swap_state = next_state(next_swap_state)?;
                push(
                    &mut lines,
                    Transition {
                        source: state,
                        target: swap_state,
                        input: key.input.0.clone(),
                        output: key.output.0.clone(),
                        weight,
                    },
                );
                push(
                    &mut lines,
                    Transition {
                        source: swap_state,
                        target: state + 1,
                        input: key.input.1.clone(),
                        output: key.output.1.clone(),
                        weight: 0.0,
                    },
                );
            }
        }
    }

    debug!(
        states = next_swap_state,
        transitions = transition_count,
        distance,
        "built edit transducer"
    );

    Ok(EditTransducer {
        lines,
        epsilon: options.epsilon.clone(),
        state_count: next_swap_state,
        transition_count,
    })
}

fn next_state(state: u32) -> Result<u32, EditDistError> {
    state.checked_add(1).ok_or_else(|| {
        EditDistError::InvalidOption(format!("state numbers overflow after state {state}"))
    })
}
