pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::alerts::AlertDesk;
use crate::application::news::{ClassifiedNews, IngestResult, NewsUseCase};
use crate::application::sampler::{QuoteSampler, SamplerState, SamplerStats};
use crate::application::snapshot::PanelSnapshot;
use crate::application::watchlist::WatchlistUseCase;
use crate::config::PanelConfig;
use crate::domain::entities::alert_rule::{AlertRule, TriggeredAlert};
use crate::domain::entities::news_item::NewsItem;
use crate::domain::entities::quote::QuoteTable;
use crate::domain::error::DomainError;
use crate::domain::ports::quote_oracle::{OracleError, QuoteOracle};
use crate::domain::ports::sampler_observer::SamplerObserver;
use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use crate::infrastructure::observers::tracing_observer::TracingObserver;
use crate::infrastructure::oracle::simulated::SimulatedOracle;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The monitoring panel core: watchlist, quote sampler, alert desk and news.
///
/// User intents (`add_symbol`, `remove_symbol`, `acknowledge_alert`) and the
/// sampler's timer are expected to be driven from one task, so none of them
/// overlap.
pub struct WatchPanel {
    watchlist_uc: WatchlistUseCase,
    sampler: QuoteSampler,
    alert_desk: AlertDesk,
    news_uc: NewsUseCase,
}

impl WatchPanel {
    /// Panel backed by the simulated oracle, logging through `tracing`.
    pub fn new(config: PanelConfig) -> Result<Self, DomainError> {
        let oracle: Arc<dyn QuoteOracle> = match config.seed {
            Some(seed) => Arc::new(SimulatedOracle::seeded(seed)),
            None => Arc::new(SimulatedOracle::new()),
        };
        Self::with_providers(config, oracle, Arc::new(TracingObserver))
    }

    pub fn with_providers(
        config: PanelConfig,
        oracle: Arc<dyn QuoteOracle>,
        observer: Arc<dyn SamplerObserver>,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        let sampler = QuoteSampler::new(
            oracle,
            config.reference_prices()?,
            observer,
            config.interval(),
        )?;

        Ok(Self {
            watchlist_uc: WatchlistUseCase::new(config.watchlist()),
            sampler,
            alert_desk: AlertDesk::new(config.rules, config.ack_policy),
            news_uc: NewsUseCase::new(config.news),
        })
    }

    /// Start sampling the current watchlist.
    pub async fn start(&mut self) {
        self.sampler.start(self.watchlist_uc.current().clone()).await;
    }

    /// Stop sampling. Returns false if the panel was not sampling.
    pub async fn stop(&mut self) -> bool {
        self.sampler.stop().await
    }

    pub fn state(&self) -> SamplerState {
        self.sampler.state()
    }

    pub fn sampler_stats(&self) -> SamplerStats {
        self.sampler.stats()
    }

    // Watchlist

    pub fn watchlist(&self) -> &Watchlist {
        self.watchlist_uc.current()
    }

    /// Add a symbol from raw user text; a running sampler restarts on change.
    pub async fn add_symbol(&mut self, text: &str) -> bool {
        let changed = self.watchlist_uc.add(text);
        if changed {
            self.sampler.sync(self.watchlist_uc.current()).await;
        }
        changed
    }

    pub async fn remove_symbol(&mut self, symbol: &str) -> bool {
        let changed = self.watchlist_uc.remove(symbol);
        if changed {
            self.sampler.sync(self.watchlist_uc.current()).await;
        }
        changed
    }

    pub fn interval(&self) -> Duration {
        self.sampler.interval()
    }

    pub async fn set_interval(&mut self, interval: Duration) -> Result<bool, DomainError> {
        self.sampler.set_interval(interval).await
    }

    // Quotes

    pub fn quotes(&self) -> Arc<QuoteTable> {
        self.sampler.latest()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<QuoteTable>> {
        self.sampler.subscribe()
    }

    /// One refresh of the current watchlist without starting the cycle.
    pub async fn refresh_once(&self) -> Result<Arc<QuoteTable>, OracleError> {
        self.sampler.refresh_once(self.watchlist_uc.current()).await
    }

    // Alerts

    pub fn alert_rules(&self) -> &[AlertRule] {
        self.alert_desk.rules()
    }

    pub fn add_alert_rule(&mut self, symbol: &str, threshold_pct: f64) -> Result<AlertRule, DomainError> {
        if !threshold_pct.is_finite() {
            return Err(DomainError::InvalidInput(format!(
                "threshold must be a number, got {threshold_pct}"
            )));
        }
        let rule = AlertRule::new(Symbol::parse(symbol)?, threshold_pct);
        Ok(self.alert_desk.add_rule(rule).clone())
    }

    pub fn remove_alert_rule(&mut self, id: &str) -> Result<AlertRule, DomainError> {
        self.alert_desk
            .remove_rule(id)
            .ok_or_else(|| DomainError::NotFound(format!("alert rule {id}")))
    }

    /// Alerts on display, recomputed if a new quote table was published.
    pub fn triggered_alerts(&mut self) -> Vec<TriggeredAlert> {
        let table = self.sampler.latest();
        self.alert_desk.sync(&table).to_vec()
    }

    /// Dismiss the alert at `index` of the list last returned by
    /// [`WatchPanel::triggered_alerts`] or [`WatchPanel::snapshot`].
    pub fn acknowledge_alert(&mut self, index: usize) -> Option<TriggeredAlert> {
        self.alert_desk.acknowledge(index)
    }

    // News

    pub fn news(&self) -> Vec<ClassifiedNews> {
        self.news_uc.curated(self.watchlist_uc.current())
    }

    pub fn ingest_news(&mut self, items: Vec<NewsItem>) -> IngestResult {
        self.news_uc.ingest(items)
    }

    /// Everything the rendering side needs for one pass.
    pub fn snapshot(&mut self) -> PanelSnapshot {
        let table = self.sampler.latest();
        let triggered = self.alert_desk.sync(&table).to_vec();
        PanelSnapshot {
            watchlist: self.watchlist_uc.current().clone(),
            quotes: (*table).clone(),
            rules: self.alert_desk.rules().to_vec(),
            triggered,
            news: self.news(),
        }
    }
}
