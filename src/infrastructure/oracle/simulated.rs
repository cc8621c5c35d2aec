use crate::domain::entities::quote::Quote;
use crate::domain::ports::quote_oracle::{OracleError, QuoteOracle};
use crate::domain::values::symbol::Symbol;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Largest relative drift, in percent, applied per sample.
pub const MAX_DRIFT_PCT: f64 = 0.4;

/// Random-walk-free quote simulator: every sample draws a fresh uniform drift
/// of at most ±[`MAX_DRIFT_PCT`] around the reference price. Nothing is
/// remembered between ticks.
pub struct SimulatedOracle {
    rng: Mutex<StdRng>,
    max_drift_pct: f64,
}

impl SimulatedOracle {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            max_drift_pct: MAX_DRIFT_PCT,
        }
    }

    /// Reproducible sequence of quotes for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            max_drift_pct: MAX_DRIFT_PCT,
        }
    }

    pub fn with_max_drift(mut self, max_drift_pct: f64) -> Self {
        self.max_drift_pct = max_drift_pct.abs();
        self
    }

    fn draw_drift_pct(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(-self.max_drift_pct..=self.max_drift_pct)
    }
}

impl Default for SimulatedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteOracle for SimulatedOracle {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn sample(&self, symbol: &Symbol, reference_price: f64) -> Result<Quote, OracleError> {
        if !reference_price.is_finite() {
            return Err(OracleError::Malformed {
                symbol: symbol.to_string(),
                reason: format!("reference price {reference_price} is not finite"),
            });
        }
        let drift = self.draw_drift_pct();
        let price = reference_price * (1.0 + drift / 100.0);
        Ok(Quote::from_reference(price, reference_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pltr() -> Symbol {
        Symbol::parse("PLTR").unwrap()
    }

    #[tokio::test]
    async fn test_drift_stays_within_band() {
        let oracle = SimulatedOracle::seeded(7);
        for _ in 0..500 {
            let q = oracle.sample(&pltr(), 159.2).await.unwrap();
            assert!(q.pct.abs() <= MAX_DRIFT_PCT + 0.01, "{q:?}");
            assert!((q.price - 159.2).abs() <= 159.2 * 0.0041, "{q:?}");
        }
    }

    #[tokio::test]
    async fn test_seeded_is_reproducible() {
        let a = SimulatedOracle::seeded(42);
        let b = SimulatedOracle::seeded(42);
        for _ in 0..20 {
            assert_eq!(
                a.sample(&pltr(), 100.0).await.unwrap(),
                b.sample(&pltr(), 100.0).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_zero_drift_returns_reference() {
        let oracle = SimulatedOracle::seeded(1).with_max_drift(0.0);
        let q = oracle.sample(&pltr(), 42.6).await.unwrap();
        assert_eq!(q, Quote { price: 42.6, change: 0.0, pct: 0.0 });
    }

    #[tokio::test]
    async fn test_non_finite_reference_is_malformed() {
        let oracle = SimulatedOracle::seeded(1);
        let err = oracle.sample(&pltr(), f64::NAN).await.unwrap_err();
        assert!(matches!(err, OracleError::Malformed { .. }));
    }
}
