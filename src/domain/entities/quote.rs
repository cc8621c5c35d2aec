use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Round to 2 decimal places. Never returns negative zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A price observation with its move against the reference price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub change: f64,
    pub pct: f64,
}

impl Quote {
    /// Build a quote from a last price and the reference it moved from.
    ///
    /// Each field is rounded to cents. `pct` is derived from the rounded
    /// `change`, so the two never carry opposite signs.
    pub fn from_reference(price: f64, reference_price: f64) -> Self {
        let price = round2(price);
        let change = round2(price - reference_price);
        let pct = if reference_price != 0.0 {
            round2(change / reference_price * 100.0)
        } else {
            0.0
        };
        Self { price, change, pct }
    }

    pub fn is_down(&self) -> bool {
        self.pct < 0.0
    }

    /// Signed percentage move, e.g. `+0.25%`, `-1.5%`, `0%`.
    pub fn formatted_move(&self) -> String {
        format_signed_pct(self.pct)
    }
}

/// `+` prefix for positive values only, matching how moves are shown on the panel.
pub fn format_signed_pct(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{pct}%")
    } else if pct == 0.0 {
        "0%".to_string()
    } else {
        format!("{pct}%")
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+}, {})", self.price, self.change, self.formatted_move())
    }
}

/// Latest quote per watched symbol, as published by one refresh tick.
///
/// A table is always built whole and never patched; a symbol dropped from the
/// watchlist disappears with the next table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteTable {
    /// Sequence number of the tick that produced this table (0 = nothing published yet).
    pub tick: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    quotes: HashMap<Symbol, Quote>,
}

impl QuoteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(tick: u64, quotes: HashMap<Symbol, Quote>) -> Self {
        Self {
            tick,
            refreshed_at: Some(Utc::now()),
            quotes,
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.quotes.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.quotes.keys()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Whether every quoted symbol is still on `watchlist`.
    pub fn only_watched(&self, watchlist: &Watchlist) -> bool {
        self.quotes.keys().all(|symbol| watchlist.contains(symbol))
    }

    /// Copy keeping only quotes for symbols on `watchlist`. Tick and
    /// timestamp carry over, since the remaining quotes are unchanged.
    pub fn retain_watched(&self, watchlist: &Watchlist) -> QuoteTable {
        QuoteTable {
            tick: self.tick,
            refreshed_at: self.refreshed_at,
            quotes: self
                .quotes
                .iter()
                .filter(|(symbol, _)| watchlist.contains(symbol))
                .map(|(symbol, quote)| (symbol.clone(), *quote))
                .collect(),
        }
    }
}

impl FromIterator<(Symbol, Quote)> for QuoteTable {
    fn from_iter<T: IntoIterator<Item = (Symbol, Quote)>>(iter: T) -> Self {
        QuoteTable::new(1, iter.into_iter().collect())
    }
}
