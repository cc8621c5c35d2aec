use crate::domain::entities::quote::Quote;
use crate::domain::error::DomainError;
use crate::domain::values::symbol::Symbol;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Source of quotes for the sampler.
///
/// The simulated oracle stands in for a live feed; a real adapter implements
/// the same contract and must resolve within the refresh interval, otherwise
/// the sampler treats the tick as failed.
#[async_trait]
pub trait QuoteOracle: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Produce a quote for `symbol` whose move is measured against `reference_price`.
    async fn sample(&self, symbol: &Symbol, reference_price: f64) -> Result<Quote, OracleError>;
}

#[derive(Debug, Clone, Error)]
pub enum OracleError {
    /// Upstream could not be reached or refused the request
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
    /// The tick did not finish within its budget
    #[error("Oracle timed out after {0:?}")]
    Timeout(Duration),
    /// Upstream answered with something that is not a quote
    #[error("Malformed quote for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },
}

impl From<OracleError> for DomainError {
    fn from(e: OracleError) -> Self {
        DomainError::OracleUnavailable(e.to_string())
    }
}
