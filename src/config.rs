//! Startup configuration.
//!
//! Layering, later wins: built-in demo defaults, then the JSON file named by
//! `WATCHPANEL_CONFIG`, then individual environment overrides.

use crate::application::sampler::DEFAULT_INTERVAL;
use crate::domain::entities::alert_rule::AlertRule;
use crate::domain::entities::news_item::NewsItem;
use crate::domain::error::DomainError;
use crate::domain::values::ack_policy::AckPolicy;
use crate::domain::values::reference_prices::ReferencePrices;
use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use crate::infrastructure::demo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "WATCHPANEL_CONFIG";
pub const ENV_INTERVAL_MS: &str = "WATCHPANEL_INTERVAL_MS";
pub const ENV_SYMBOLS: &str = "WATCHPANEL_SYMBOLS";
pub const ENV_ACK_POLICY: &str = "WATCHPANEL_ACK_POLICY";
pub const ENV_SEED: &str = "WATCHPANEL_SEED";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Milliseconds between refresh ticks.
    pub interval_ms: u64,
    /// Initial watchlist, raw user text.
    pub symbols: Vec<String>,
    /// Reference price per symbol; unknown symbols fall back to 100.0.
    pub reference_prices: HashMap<String, f64>,
    pub rules: Vec<AlertRule>,
    pub news: Vec<NewsItem>,
    pub ack_policy: AckPolicy,
    /// Seed for the simulated oracle. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            symbols: demo::demo_symbols(),
            reference_prices: demo::demo_reference_prices(),
            rules: demo::demo_rules(),
            news: demo::demo_news(),
            ack_policy: AckPolicy::default(),
            seed: None,
        }
    }
}

impl PanelConfig {
    /// Defaults, optional config file, then environment overrides.
    pub fn load() -> Result<Self, DomainError> {
        let mut config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Fields missing from the file keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: PanelConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Apply `WATCHPANEL_*` overrides fetched through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup(ENV_INTERVAL_MS) {
            self.interval_ms = ms
                .trim()
                .parse()
                .map_err(|e| DomainError::Config(format!("{ENV_INTERVAL_MS}={ms}: {e}")))?;
        }
        if let Some(symbols) = lookup(ENV_SYMBOLS) {
            self.symbols = symbols.split(',').map(|s| s.to_string()).collect();
        }
        if let Some(policy) = lookup(ENV_ACK_POLICY) {
            self.ack_policy = policy.parse().map_err(DomainError::Config)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| DomainError::Config(format!("{ENV_SEED}={seed}: {e}")))?,
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.interval_ms == 0 {
            return Err(DomainError::Config("interval_ms must be positive".into()));
        }
        for (symbol, price) in &self.reference_prices {
            if !price.is_finite() || *price <= 0.0 {
                return Err(DomainError::Config(format!(
                    "reference price for {symbol} must be positive, got {price}"
                )));
            }
        }
        for rule in &self.rules {
            if !rule.threshold_pct.is_finite() {
                return Err(DomainError::Config(format!(
                    "threshold for {} is not a number",
                    rule.symbol
                )));
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn watchlist(&self) -> Watchlist {
        Watchlist::from_raw(&self.symbols)
    }

    pub fn reference_prices(&self) -> Result<ReferencePrices, DomainError> {
        self.reference_prices
            .iter()
            .map(|(raw, price)| Ok::<_, DomainError>((Symbol::parse(raw)?, *price)))
            .collect()
    }
}
