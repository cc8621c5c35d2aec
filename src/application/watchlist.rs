use crate::domain::values::symbol::Symbol;
use crate::domain::values::watchlist::Watchlist;
use tracing::debug;

/// Applies user add/remove intents to the watchlist.
pub struct WatchlistUseCase {
    current: Watchlist,
}

impl WatchlistUseCase {
    pub fn new(initial: Watchlist) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &Watchlist {
        &self.current
    }

    /// Add a symbol from raw text. Returns whether the watchlist changed;
    /// blank input and already-watched symbols are ignored.
    pub fn add(&mut self, raw: &str) -> bool {
        if let Err(e) = Symbol::parse(raw) {
            debug!("ignoring add: {e}");
            return false;
        }
        self.replace(self.current.with_symbol(raw))
    }

    /// Remove a symbol. Returns whether the watchlist changed.
    pub fn remove(&mut self, raw: &str) -> bool {
        self.replace(self.current.without_symbol(raw))
    }

    fn replace(&mut self, next: Watchlist) -> bool {
        if next == self.current {
            return false;
        }
        debug!(from = self.current.len(), to = next.len(), "watchlist changed");
        self.current = next;
        true
    }
}
