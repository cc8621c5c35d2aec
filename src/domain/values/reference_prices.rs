use crate::domain::error::DomainError;
use crate::domain::values::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference price used for symbols missing from the seed table.
pub const DEFAULT_REFERENCE_PRICE: f64 = 100.0;

/// Seed table of reference prices. Quotes report their move against these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferencePrices {
    prices: HashMap<Symbol, f64>,
}

impl ReferencePrices {
    pub fn new(prices: HashMap<Symbol, f64>) -> Self {
        Self { prices }
    }

    /// Exact lookup, failing for symbols without a seed price.
    pub fn lookup(&self, symbol: &Symbol) -> Result<f64, DomainError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| DomainError::UnknownSymbolReference(symbol.to_string()))
    }

    /// Seed price, or [`DEFAULT_REFERENCE_PRICE`] for unknown symbols.
    pub fn price_for(&self, symbol: &Symbol) -> f64 {
        self.lookup(symbol).unwrap_or(DEFAULT_REFERENCE_PRICE)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &f64)> {
        self.prices.iter()
    }
}

impl FromIterator<(Symbol, f64)> for ReferencePrices {
    fn from_iter<T: IntoIterator<Item = (Symbol, f64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_symbol_falls_back() {
        let refs: ReferencePrices = [(Symbol::parse("PLTR").unwrap(), 159.2)]
            .into_iter()
            .collect();
        let unknown = Symbol::parse("NVDA").unwrap();
        assert_eq!(refs.price_for(&Symbol::parse("pltr").unwrap()), 159.2);
        assert_eq!(refs.price_for(&unknown), DEFAULT_REFERENCE_PRICE);
        assert!(matches!(
            refs.lookup(&unknown),
            Err(DomainError::UnknownSymbolReference(_))
        ));
    }
}
