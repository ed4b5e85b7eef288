// Symbols and the alphabet they are drawn from.

use std::collections::BTreeMap;

/// ATT spelling of the catch-all symbol that matches anything outside the alphabet.
pub const OTHER_SYMBOL: &str = "@_UNKNOWN_SYMBOL_@";

/// Default ATT spelling of the empty symbol.
pub const DEFAULT_EPSILON: &str = "@0@";

/// A transducer symbol.
///
/// The two sentinels are distinct variants rather than reserved strings, so an
/// alphabet that happens to contain the epsilon literal can never be confused
/// with epsilon itself. The derived order (`Epsilon`, `Other`, then literals by
/// code point) is the emission order of every table in this crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// The empty string: insertion source, deletion target.
    Epsilon,
    /// Any symbol not in the alphabet.
    Other,
    /// An ordinary alphabet symbol.
    Literal(String),
}

impl Symbol {
    pub fn literal(text: impl Into<String>) -> Self {
        Symbol::Literal(text.into())
    }

    /// Map a token read from text input to a symbol, recognising the sentinel spellings.
    pub fn from_token(token: &str, epsilon: &str) -> Self {
        if token == epsilon {
            Symbol::Epsilon
        } else if token == OTHER_SYMBOL {
            Symbol::Other
        } else {
            Symbol::Literal(token.to_string())
        }
    }

    /// ATT spelling of this symbol.
    pub fn as_att<'a>(&'a self, epsilon: &'a str) -> &'a str {
        match self {
            Symbol::Epsilon => epsilon,
            Symbol::Other => OTHER_SYMBOL,
            Symbol::Literal(s) => s,
        }
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Symbol::Literal(_))
    }
}

/// Alphabet symbols with their penalty weights.
///
/// The penalty of a symbol is added to the default cost of every edit that
/// involves it. Only [`Symbol::Literal`] members are stored; the first
/// penalty recorded for a symbol wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alphabet {
    penalties: BTreeMap<Symbol, f64>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One symbol per character of `text`, all with penalty 0.0.
    pub fn from_chars(text: &str) -> Self {
        let mut alphabet = Self::new();
        for ch in text.chars() {
            alphabet.insert(Symbol::Literal(ch.to_string()), 0.0);
        }
        alphabet
    }

    /// Add `symbol` with `penalty` unless it is already present.
    ///
    /// Returns `false` when the symbol was a sentinel or already known.
    pub fn insert(&mut self, symbol: Symbol, penalty: f64) -> bool {
        if !symbol.is_literal() || self.penalties.contains_key(&symbol) {
            return false;
        }
        self.penalties.insert(symbol, penalty);
        true
    }

    /// Union `other` into `self`; symbols already present keep their penalty.
    pub fn merge(&mut self, other: &Alphabet) {
        for (symbol, penalty) in other.iter() {
            self.insert(symbol.clone(), penalty);
        }
    }

    /// Penalty weight of `symbol`, 0.0 for sentinels and unknown symbols.
    #[inline]
    pub fn penalty(&self, symbol: &Symbol) -> f64 {
        self.penalties.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.penalties.contains_key(symbol)
    }

    /// Symbols in code point order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.penalties.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, f64)> {
        self.penalties.iter().map(|(s, p)| (s, *p))
    }

    pub fn len(&self) -> usize {
        self.penalties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }
}
