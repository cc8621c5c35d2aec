use crate::domain::values::symbol::Symbol;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of watched symbols. Insertion order is display order.
///
/// Values are never mutated in place: [`Watchlist::with_symbol`] and
/// [`Watchlist::without_symbol`] return a new list, and callers detect a change
/// by comparing the result with the previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        symbols.into_iter().collect()
    }

    /// Parse raw user text, silently skipping blanks and duplicates.
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        raw.iter()
            .filter_map(|s| Symbol::parse(s.as_ref()).ok())
            .collect()
    }

    /// A copy with `raw` appended. Blank input or an already-watched symbol
    /// yields an equal copy.
    pub fn with_symbol(&self, raw: &str) -> Watchlist {
        match Symbol::parse(raw) {
            Ok(symbol) if !self.contains(&symbol) => {
                let mut symbols = self.symbols.clone();
                symbols.push(symbol);
                Watchlist { symbols }
            }
            _ => self.clone(),
        }
    }

    /// A copy without `raw`. Removing an unwatched symbol yields an equal copy.
    pub fn without_symbol(&self, raw: &str) -> Watchlist {
        match Symbol::parse(raw) {
            Ok(symbol) => Watchlist {
                symbols: self
                    .symbols
                    .iter()
                    .filter(|s| **s != symbol)
                    .cloned()
                    .collect(),
            },
            Err(_) => self.clone(),
        }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<Symbol> for Watchlist {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        let mut symbols: Vec<Symbol> = Vec::new();
        for symbol in iter {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Watchlist { symbols }
    }
}

impl From<Vec<Symbol>> for Watchlist {
    fn from(symbols: Vec<Symbol>) -> Self {
        symbols.into_iter().collect()
    }
}

impl From<Watchlist> for Vec<Symbol> {
    fn from(w: Watchlist) -> Self {
        w.symbols
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
