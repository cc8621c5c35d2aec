use crate::application::news::ClassifiedNews;
use crate::domain::entities::alert_rule::{AlertRule, TriggeredAlert};
use crate::domain::entities::quote::{Quote, QuoteTable};
use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use serde::Serialize;
use std::fmt;

/// Read-only view handed to the rendering side on each render pass.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub watchlist: Watchlist,
    pub quotes: QuoteTable,
    pub rules: Vec<AlertRule>,
    pub triggered: Vec<TriggeredAlert>,
    pub news: Vec<ClassifiedNews>,
}

/// One line of the quote table, in watchlist order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRow {
    pub symbol: Symbol,
    pub quote: Option<Quote>,
    /// `"down"` for a negative move, `"up"` otherwise; `None` before the first quote.
    pub class: Option<&'static str>,
}

impl PanelSnapshot {
    /// Watchlist symbols paired with their quote, if one has been published yet.
    pub fn rows(&self) -> Vec<QuoteRow> {
        self.watchlist
            .iter()
            .map(|symbol| {
                let quote = self.quotes.get(symbol).copied();
                QuoteRow {
                    symbol: symbol.clone(),
                    quote,
                    class: quote.map(|q| if q.is_down() { "down" } else { "up" }),
                }
            })
            .collect()
    }
}

impl fmt::Display for QuoteRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quote {
            Some(q) => write!(
                f,
                "{:<8} {:>10} {:>8} {:>8} {}",
                self.symbol,
                q.price,
                q.change,
                q.formatted_move(),
                self.class.unwrap_or_default()
            ),
            None => write!(f, "{:<8} {:>10} {:>8} {:>8}", self.symbol, "–", "–", "–"),
        }
    }
}
