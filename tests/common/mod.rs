//! Shared test helpers: deterministic oracles and a recording observer.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use watchpanel::config::PanelConfig;
use watchpanel::domain::entities::news_item::NewsItem;
use watchpanel::domain::entities::quote::{Quote, QuoteTable};
use watchpanel::domain::ports::quote_oracle::{OracleError, QuoteOracle};
use watchpanel::domain::ports::sampler_observer::SamplerObserver;
use watchpanel::domain::values::symbol::Symbol;
use watchpanel::WatchPanel;

pub fn sym(s: &str) -> Symbol {
    Symbol::parse(s).unwrap()
}

/// Oracle returning a fixed percentage move per symbol (0 when unset).
#[derive(Default)]
pub struct ScriptedOracle {
    moves: Mutex<HashMap<String, f64>>,
    references: Mutex<Vec<(String, f64)>>,
    delay: Option<Duration>,
    failing: AtomicBool,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn set_move(&self, symbol: &str, pct: f64) {
        self.moves.lock().unwrap().insert(symbol.to_string(), pct);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Reference prices the oracle was asked about, in call order.
    pub fn references(&self) -> Vec<(String, f64)> {
        self.references.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn sample(&self, symbol: &Symbol, reference_price: f64) -> Result<Quote, OracleError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable("scripted outage".into()));
        }
        self.references
            .lock()
            .unwrap()
            .push((symbol.to_string(), reference_price));
        let pct = self
            .moves
            .lock()
            .unwrap()
            .get(symbol.as_str())
            .copied()
            .unwrap_or(0.0);
        Ok(Quote::from_reference(
            reference_price * (1.0 + pct / 100.0),
            reference_price,
        ))
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    refreshed: Mutex<Vec<u64>>,
    failures: Mutex<Vec<(u64, String)>>,
}

impl RecordingObserver {
    pub fn refreshed(&self) -> Vec<u64> {
        self.refreshed.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(u64, String)> {
        self.failures.lock().unwrap().clone()
    }
}

impl SamplerObserver for RecordingObserver {
    fn on_refresh(&self, table: &QuoteTable) {
        self.refreshed.lock().unwrap().push(table.tick);
    }

    fn on_failure(&self, tick: u64, error: &OracleError) {
        self.failures.lock().unwrap().push((tick, error.to_string()));
    }
}

/// Config with every reference price at the 100.0 fallback, so a scripted
/// move of `x` percent yields `pct == x` exactly.
pub fn flat_config(symbols: &[&str]) -> PanelConfig {
    PanelConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        reference_prices: HashMap::new(),
        ..Default::default()
    }
}

pub fn setup(
    config: PanelConfig,
) -> (WatchPanel, Arc<ScriptedOracle>, Arc<RecordingObserver>) {
    let oracle = Arc::new(ScriptedOracle::new());
    let observer = Arc::new(RecordingObserver::default());
    let panel = WatchPanel::with_providers(config, oracle.clone(), observer.clone()).unwrap();
    (panel, oracle, observer)
}

pub fn news_item(id: &str, symbol: &str, headline: &str) -> NewsItem {
    NewsItem::new(sym(symbol), headline.to_string(), "#".to_string(), "TestWire".to_string())
        .with_id(id)
}

pub fn table(moves: &[(&str, f64)]) -> QuoteTable {
    moves
        .iter()
        .map(|(s, pct)| {
            (
                sym(s),
                Quote {
                    price: 100.0 + pct,
                    change: *pct,
                    pct: *pct,
                },
            )
        })
        .collect()
}
