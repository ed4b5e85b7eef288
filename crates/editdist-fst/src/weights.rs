// Substitution and swap weight tables, and the default-weight resolver.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::overrides::Overrides;
use crate::symbols::{Alphabet, Symbol};

/// Cost of any edit before symbol penalties are added.
pub const BASE_EDIT_WEIGHT: f64 = 1.0;

/// Weights of single-symbol edits keyed by `(input, output)`.
///
/// One table covers substitutions, insertions (`Epsilon` input), deletions
/// (`Epsilon` output) and edits involving `Other`. Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    entries: BTreeMap<(Symbol, Symbol), f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `weight` for `(from, to)` unless the pair already has one.
    ///
    /// Returns whether the entry was inserted.
    pub fn insert_if_absent(&mut self, from: Symbol, to: Symbol, weight: f64) -> bool {
        match self.entries.entry((from, to)) {
            Entry::Vacant(e) => {
                e.insert(weight);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, from: &Symbol, to: &Symbol) -> Option<f64> {
        self.entries.get(&(from.clone(), to.clone())).copied()
    }

    pub fn contains(&self, from: &Symbol, to: &Symbol) -> bool {
        self.get(from, to).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Symbol, f64)> {
        self.entries.iter().map(|((f, t), w)| (f, t, *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transposition edit: `input` is read and `output` written, one symbol pair
/// per half-transition.
///
/// The canonical key for swapping adjacent `a b` is `((a, b), (b, a))`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwapKey {
    pub input: (Symbol, Symbol),
    pub output: (Symbol, Symbol),
}

impl SwapKey {
    /// Canonical key for reading `a b` and writing `b a`.
    pub fn transpose(a: Symbol, b: Symbol) -> Self {
        Self {
            input: (a.clone(), b.clone()),
            output: (b, a),
        }
    }

    /// The same swap read in the other direction.
    pub fn reversed(&self) -> Self {
        Self {
            input: self.output.clone(),
            output: self.input.clone(),
        }
    }
}

/// Swap weights keyed by [`SwapKey`], iterated in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapTable {
    entries: BTreeMap<SwapKey, f64>,
}

impl SwapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `weight` for `key` unless it already has one.
    pub fn insert_if_absent(&mut self, key: SwapKey, weight: f64) -> bool {
        match self.entries.entry(key) {
            Entry::Vacant(e) => {
                e.insert(weight);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &SwapKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SwapKey, f64)> {
        self.entries.iter().map(|(k, w)| (k, *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fully populated weight tables, ready for the builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedWeights {
    pub substitutions: WeightTable,
    /// Empty unless swaps were requested.
    pub swaps: SwapTable,
}

/// Complete the explicit weights in `overrides` for every edit over `alphabet`.
///
/// Explicit entries are copied first and never overwritten. Missing entries
/// are then filled in symbol order: an ordered pair with no weight takes the
/// weight of its mirror pair if that one is already known, otherwise
/// `1.0 + penalty(a) + penalty(b)`. Edits against `Epsilon` and `Other` cost
/// `1.0 + penalty(s)`, and `(Other, Epsilon)` costs `1.0`.
pub fn resolve(alphabet: &Alphabet, overrides: &Overrides, swaps: bool) -> ResolvedWeights {
    let mut substitutions = overrides.substitutions.clone();
    let mut swap_table = if swaps {
        overrides.swaps.clone()
    } else {
        SwapTable::new()
    };

    substitutions.insert_if_absent(Symbol::Other, Symbol::Epsilon, BASE_EDIT_WEIGHT);

    for (sym, penalty) in alphabet.iter() {
        let weight = BASE_EDIT_WEIGHT + penalty;
        substitutions.insert_if_absent(Symbol::Other, sym.clone(), weight);
        substitutions.insert_if_absent(Symbol::Epsilon, sym.clone(), weight);
        substitutions.insert_if_absent(sym.clone(), Symbol::Epsilon, weight);
    }

    for (a, pa) in alphabet.iter() {
        for (b, pb) in alphabet.iter() {
            if a == b {
                continue;
            }
            let default = BASE_EDIT_WEIGHT + pa + pb;

            if !substitutions.contains(a, b) {
                let weight = substitutions.get(b, a).unwrap_or(default);
                substitutions.insert_if_absent(a.clone(), b.clone(), weight);
            }

            if swaps {
                let key = SwapKey::transpose(a.clone(), b.clone());
                if swap_table.get(&key).is_none() {
                    let weight = swap_table.get(&key.reversed()).unwrap_or(default);
                    swap_table.insert_if_absent(key, weight);
                }
            }
        }
    }

    debug!(
        substitutions = substitutions.len(),
        swaps = swap_table.len(),
        "resolved edit weights"
    );

    ResolvedWeights {
        substitutions,
        swaps: swap_table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Symbol {
        Symbol::literal(s)
    }

    fn weighted_alphabet(entries: &[(&str, f64)]) -> Alphabet {
        let mut alphabet = Alphabet::new();
        for (s, p) in entries {
            alphabet.insert(lit(s), *p);
        }
        alphabet
    }

    #[test]
    fn defaults_for_plain_alphabet() {
        let alphabet = Alphabet::from_chars("ab");
        let resolved = resolve(&alphabet, &Overrides::default(), false);
        let subs = &resolved.substitutions;

        assert_eq!(subs.get(&Symbol::Other, &Symbol::Epsilon), Some(1.0));
        assert_eq!(subs.get(&Symbol::Other, &lit("a")), Some(1.0));
        assert_eq!(subs.get(&Symbol::Epsilon, &lit("b")), Some(1.0));
        assert_eq!(subs.get(&lit("b"), &Symbol::Epsilon), Some(1.0));
        assert_eq!(subs.get(&lit("a"), &lit("b")), Some(1.0));
        assert_eq!(subs.get(&lit("b"), &lit("a")), Some(1.0));
        assert_eq!(subs.get(&lit("a"), &lit("a")), None);
        assert_eq!(subs.get(&lit("a"), &Symbol::Other), None);
        // (OTHER,eps) + 3 per symbol + 2 ordered pairs
        assert_eq!(subs.len(), 1 + 3 * 2 + 2);
        assert!(resolved.swaps.is_empty());
    }

    #[test]
    fn mirror_inherits_explicit_weight() {
        let alphabet = Alphabet::from_chars("xy");
        let mut overrides = Overrides::default();
        overrides
            .substitutions
            .insert_if_absent(lit("x"), lit("y"), 0.3);
        let resolved = resolve(&alphabet, &overrides, false);
        assert_eq!(resolved.substitutions.get(&lit("x"), &lit("y")), Some(0.3));
        assert_eq!(resolved.substitutions.get(&lit("y"), &lit("x")), Some(0.3));
    }

    #[test]
    fn explicit_weights_both_directions_are_kept() {
        let alphabet = Alphabet::from_chars("xy");
        let mut overrides = Overrides::default();
        overrides.substitutions.insert_if_absent(lit("x"), lit("y"), 0.3);
        overrides.substitutions.insert_if_absent(lit("y"), lit("x"), 2.5);
        let resolved = resolve(&alphabet, &overrides, false);
        assert_eq!(resolved.substitutions.get(&lit("x"), &lit("y")), Some(0.3));
        assert_eq!(resolved.substitutions.get(&lit("y"), &lit("x")), Some(2.5));
    }

    #[test]
    fn penalties_are_additive() {
        let alphabet = weighted_alphabet(&[("a", 0.5), ("b", 0.25)]);
        let resolved = resolve(&alphabet, &Overrides::default(), true);
        let subs = &resolved.substitutions;

        assert_eq!(subs.get(&lit("a"), &lit("b")), Some(1.0 + 0.5 + 0.25));
        assert_eq!(subs.get(&lit("b"), &lit("a")), Some(1.0 + 0.5 + 0.25));
        assert_eq!(subs.get(&Symbol::Other, &lit("a")), Some(1.5));
        assert_eq!(subs.get(&Symbol::Epsilon, &lit("b")), Some(1.25));
        assert_eq!(subs.get(&lit("a"), &Symbol::Epsilon), Some(1.5));
        assert_eq!(subs.get(&Symbol::Other, &Symbol::Epsilon), Some(1.0));

        let key = SwapKey::transpose(lit("a"), lit("b"));
        assert_eq!(resolved.swaps.get(&key), Some(1.75));
        assert_eq!(resolved.swaps.get(&key.reversed()), Some(1.75));
    }

    #[test]
    fn explicit_insertion_weight_survives() {
        let alphabet = weighted_alphabet(&[("a", 0.5)]);
        let mut overrides = Overrides::default();
        overrides
            .substitutions
            .insert_if_absent(Symbol::Epsilon, lit("a"), 0.1);
        overrides
            .substitutions
            .insert_if_absent(Symbol::Other, Symbol::Epsilon, 9.0);
        let resolved = resolve(&alphabet, &overrides, false);
        assert_eq!(resolved.substitutions.get(&Symbol::Epsilon, &lit("a")), Some(0.1));
        assert_eq!(resolved.substitutions.get(&lit("a"), &Symbol::Epsilon), Some(1.5));
        assert_eq!(
            resolved.substitutions.get(&Symbol::Other, &Symbol::Epsilon),
            Some(9.0)
        );
    }

    #[test]
    fn swap_mirror_inherits_explicit_weight() {
        let alphabet = Alphabet::from_chars("st");
        let mut overrides = Overrides::default();
        let key = SwapKey::transpose(lit("t"), lit("s"));
        overrides.swaps.insert_if_absent(key.clone(), 0.2);
        let resolved = resolve(&alphabet, &overrides, true);
        assert_eq!(resolved.swaps.get(&key), Some(0.2));
        assert_eq!(resolved.swaps.get(&key.reversed()), Some(0.2));
        assert_eq!(resolved.swaps.len(), 2);
    }

    #[test]
    fn swaps_off_leaves_swap_table_empty() {
        let alphabet = Alphabet::from_chars("st");
        let mut overrides = Overrides::default();
        overrides
            .swaps
            .insert_if_absent(SwapKey::transpose(lit("s"), lit("t")), 0.2);
        let resolved = resolve(&alphabet, &overrides, false);
        assert!(resolved.swaps.is_empty());
    }

    #[test]
    fn resolving_a_complete_table_changes_nothing() {
        let alphabet = weighted_alphabet(&[("a", 0.7), ("b", 0.1)]);
        let first = resolve(&alphabet, &Overrides::default(), true);

        let mut overrides = Overrides::default();
        for (from, to, w) in first.substitutions.iter() {
            overrides.substitutions.insert_if_absent(from.clone(), to.clone(), w * 3.0);
        }
        for (key, w) in first.swaps.iter() {
            overrides.swaps.insert_if_absent(key.clone(), w * 3.0);
        }
        let second = resolve(&alphabet, &overrides, true);
        assert_eq!(second.substitutions, overrides.substitutions);
        assert_eq!(second.swaps, overrides.swaps);
    }

    #[test]
    fn swap_key_reversal() {
        let key = SwapKey::transpose(lit("a"), lit("b"));
        assert_eq!(key.input, (lit("a"), lit("b")));
        assert_eq!(key.output, (lit("b"), lit("a")));
        assert_eq!(key.reversed(), SwapKey::transpose(lit("b"), lit("a")));
        assert_eq!(key.reversed().reversed(), key);
    }
}
