use crate::domain::entities::quote::QuoteTable;
use crate::domain::ports::quote_oracle::OracleError;
use crate::domain::ports::sampler_observer::SamplerObserver;
use tracing::{debug, warn};

/// Reports sampler activity through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SamplerObserver for TracingObserver {
    fn on_refresh(&self, table: &QuoteTable) {
        debug!(tick = table.tick, symbols = table.len(), "quote table published");
    }

    fn on_failure(&self, tick: u64, error: &OracleError) {
        warn!(tick, error = %error, "refresh failed, keeping previous quote table");
    }
}
