use crate::domain::entities::quote::QuoteTable;
use crate::domain::ports::quote_oracle::OracleError;

/// Observability hook for the quote sampler.
///
/// `on_failure` is called for every tick that kept the previous table because
/// the oracle failed or timed out.
pub trait SamplerObserver: Send + Sync {
    fn on_refresh(&self, table: &QuoteTable);

    fn on_failure(&self, tick: u64, error: &OracleError);
}
