//! Periodic quote sampling.
//!
//! [`QuoteSampler`] is an explicit state machine (`Idle -> Running -> Idle`)
//! owning at most one refresh cycle. A cycle is bound to the watchlist and
//! interval it was started with; changing either tears the cycle down and
//! starts a fresh one with an immediate refresh.
//!
//! Tables are published through a `tokio::sync::watch` channel as whole
//! `Arc<QuoteTable>` values, so readers never see a half-built table.

use crate::domain::entities::quote::{Quote, QuoteTable};
use crate::domain::error::DomainError;
use crate::domain::ports::quote_oracle::{OracleError, QuoteOracle};
use crate::domain::ports::sampler_observer::SamplerObserver;
use crate::domain::values::reference_prices::ReferencePrices;
use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SamplerStats {
    /// Ticks attempted, failed ones included.
    pub ticks: u64,
    pub failures: u64,
}

/// Everything a tick needs, shared between the sampler and its running cycle.
#[derive(Clone)]
struct Refresher {
    oracle: Arc<dyn QuoteOracle>,
    references: Arc<ReferencePrices>,
    observer: Arc<dyn SamplerObserver>,
    publisher: Arc<watch::Sender<Arc<QuoteTable>>>,
    ticks: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl Refresher {
    /// Sample every watched symbol and publish the new table. On failure the
    /// previous quotes for still-watched symbols stay published and the
    /// observer is told.
    async fn refresh(
        &self,
        watchlist: &Watchlist,
        budget: Duration,
    ) -> Result<Arc<QuoteTable>, OracleError> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;

        let sampled = match tokio::time::timeout(budget, self.sample_all(watchlist)).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(budget)),
        };

        match sampled {
            Ok(quotes) => {
                let table = Arc::new(QuoteTable::new(tick, quotes));
                self.publisher.send_replace(table.clone());
                self.observer.on_refresh(&table);
                Ok(table)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                self.prune(watchlist);
                self.observer.on_failure(tick, &e);
                Err(e)
            }
        }
    }

    /// Drop quotes for symbols no longer on `watchlist` from the published
    /// table. Returns whether a pruned table was published.
    fn prune(&self, watchlist: &Watchlist) -> bool {
        self.publisher.send_if_modified(|current| {
            if current.only_watched(watchlist) {
                return false;
            }
            debug!(tick = current.tick, "pruning unwatched quotes");
            *current = Arc::new(current.retain_watched(watchlist));
            true
        })
    }

    async fn sample_all(
        &self,
        watchlist: &Watchlist,
    ) -> Result<HashMap<Symbol, Quote>, OracleError> {
        let mut quotes = HashMap::with_capacity(watchlist.len());
        for symbol in watchlist {
            let reference = match self.references.lookup(symbol) {
                Ok(price) => price,
                Err(e) => {
                    debug!("{e}, using fallback");
                    self.references.price_for(symbol)
                }
            };
            let quote = self.oracle.sample(symbol, reference).await?;
            quotes.insert(symbol.clone(), quote);
        }
        Ok(quotes)
    }
}

/// A running refresh cycle: the spawned loop plus the snapshot it runs against.
struct RefreshCycle {
    watchlist: Watchlist,
    interval: Duration,
    cancel: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshCycle {
    /// Signal the loop to stop. Returns false if it was already signalled.
    fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(tx) => {
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }
}

pub struct QuoteSampler {
    refresher: Refresher,
    interval: Duration,
    cycle: Option<RefreshCycle>,
}

impl QuoteSampler {
    pub fn new(
        oracle: Arc<dyn QuoteOracle>,
        references: ReferencePrices,
        observer: Arc<dyn SamplerObserver>,
        interval: Duration,
    ) -> Result<Self, DomainError> {
        validate_interval(interval)?;
        let (publisher, _) = watch::channel(Arc::new(QuoteTable::empty()));
        Ok(Self {
            refresher: Refresher {
                oracle,
                references: Arc::new(references),
                observer,
                publisher: Arc::new(publisher),
                ticks: Arc::new(AtomicU64::new(0)),
                failures: Arc::new(AtomicU64::new(0)),
            },
            interval,
            cycle: None,
        })
    }

    pub fn state(&self) -> SamplerState {
        match self.cycle {
            Some(_) => SamplerState::Running,
            None => SamplerState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> SamplerStats {
        SamplerStats {
            ticks: self.refresher.ticks.load(Ordering::Relaxed),
            failures: self.refresher.failures.load(Ordering::Relaxed),
        }
    }

    /// Most recently published table.
    pub fn latest(&self) -> Arc<QuoteTable> {
        self.refresher.publisher.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<QuoteTable>> {
        self.refresher.publisher.subscribe()
    }

    /// One refresh outside of any cycle.
    pub async fn refresh_once(
        &self,
        watchlist: &Watchlist,
    ) -> Result<Arc<QuoteTable>, OracleError> {
        self.refresher.refresh(watchlist, self.interval).await
    }

    /// Stop any running cycle, refresh immediately, then keep refreshing every
    /// interval. A failed first refresh does not prevent the cycle from starting.
    pub async fn start(&mut self, watchlist: Watchlist) {
        self.stop().await;

        let _ = self.refresher.refresh(&watchlist, self.interval).await;

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let handle = tokio::spawn(run_cycle(
            self.refresher.clone(),
            watchlist.clone(),
            self.interval,
            cancel_rx,
        ));

        info!(
            symbols = watchlist.len(),
            interval_ms = self.interval.as_millis() as u64,
            oracle = self.refresher.oracle.name(),
            "quote sampler running"
        );

        self.cycle = Some(RefreshCycle {
            watchlist,
            interval: self.interval,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        });
    }

    /// Restart the running cycle if `watchlist` differs from the one it samples.
    /// An idle sampler stays idle, but stops publishing quotes for symbols
    /// dropped from `watchlist`. Returns whether a restart happened.
    pub async fn sync(&mut self, watchlist: &Watchlist) -> bool {
        let stale = match &self.cycle {
            Some(cycle) => cycle.watchlist != *watchlist,
            None => {
                self.refresher.prune(watchlist);
                false
            }
        };
        if stale {
            self.start(watchlist.clone()).await;
        }
        stale
    }

    /// Change the refresh interval, restarting a running cycle on change.
    pub async fn set_interval(&mut self, interval: Duration) -> Result<bool, DomainError> {
        validate_interval(interval)?;
        if interval == self.interval {
            return Ok(false);
        }
        self.interval = interval;
        let restart = match &self.cycle {
            Some(cycle) if cycle.interval != interval => Some(cycle.watchlist.clone()),
            _ => None,
        };
        if let Some(watchlist) = restart {
            self.start(watchlist).await;
        }
        Ok(true)
    }

    /// Cancel the running cycle and wait for an in-flight tick to finish.
    /// Returns false when already idle; stopping twice is harmless.
    pub async fn stop(&mut self) -> bool {
        let Some(mut cycle) = self.cycle.take() else {
            return false;
        };
        cycle.cancel();
        if let Some(handle) = cycle.handle.take() {
            if let Err(e) = handle.await {
                debug!("refresh cycle ended abnormally: {e}");
            }
        }
        debug!("quote sampler idle");
        true
    }
}

impl Drop for QuoteSampler {
    fn drop(&mut self) {
        if let Some(cycle) = self.cycle.as_mut() {
            cycle.cancel();
        }
    }
}

fn validate_interval(interval: Duration) -> Result<(), DomainError> {
    if interval.is_zero() {
        return Err(DomainError::Config("refresh interval must be positive".into()));
    }
    Ok(())
}

async fn run_cycle(
    refresher: Refresher,
    watchlist: Watchlist,
    interval: Duration,
    mut cancel: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => break,
            _ = ticker.tick() => {}
        }
        // Failures are reported by the refresher; the schedule carries on.
        let _ = refresher.refresh(&watchlist, interval).await;
    }
}
