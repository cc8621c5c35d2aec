use crate::domain::values::symbol::Symbol;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A headline about one instrument. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub symbol: Symbol,
    pub headline: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl NewsItem {
    pub fn new(symbol: Symbol, headline: String, url: String, source: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol,
            headline,
            url,
            timestamp: Utc::now(),
            source,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
