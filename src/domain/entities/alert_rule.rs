use crate::domain::entities::quote::{format_signed_pct, Quote};
use crate::domain::values::alert_direction::AlertDirection;
use crate::domain::values::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A percentage-move threshold on one symbol.
///
/// Rules live independently of the watchlist; a rule whose symbol has no quote
/// simply never fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    #[serde(default = "new_rule_id")]
    pub id: String,
    pub symbol: Symbol,
    pub threshold_pct: f64,
}

fn new_rule_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl AlertRule {
    pub fn new(symbol: Symbol, threshold_pct: f64) -> Self {
        Self {
            id: new_rule_id(),
            symbol,
            threshold_pct,
        }
    }

    pub fn direction(&self) -> AlertDirection {
        AlertDirection::for_threshold(self.threshold_pct)
    }

    /// Compare the quote's current move against the threshold.
    pub fn check(&self, quote: &Quote) -> Option<TriggeredAlert> {
        if !self.direction().is_crossed(quote.pct, self.threshold_pct) {
            return None;
        }
        Some(TriggeredAlert {
            rule_id: self.id.clone(),
            symbol: self.symbol.clone(),
            threshold_pct: self.threshold_pct,
            observed_price: quote.price,
            observed_pct: quote.pct,
        })
    }
}

impl fmt::Display for AlertRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, format_signed_pct(self.threshold_pct))
    }
}

/// A rule whose condition holds against the latest quote table. Recomputed on
/// every publish and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredAlert {
    pub rule_id: String,
    pub symbol: Symbol,
    pub threshold_pct: f64,
    pub observed_price: f64,
    pub observed_pct: f64,
}

impl TriggeredAlert {
    /// e.g. `PLTR moved +2.1% to 162.54`
    pub fn message(&self) -> String {
        format!(
            "{} moved {} to {}",
            self.symbol,
            format_signed_pct(self.observed_pct),
            self.observed_price
        )
    }
}
