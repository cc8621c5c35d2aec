use crate::domain::entities::news_item::NewsItem;
use crate::domain::values::sentiment::SentimentLabel;
use crate::domain::values::watchlist::Watchlist;
use serde::Serialize;
use std::collections::HashSet;

pub const POSITIVE_KEYWORDS: [&str; 7] = [
    "beats",
    "surge",
    "record",
    "profit",
    "upgrade",
    "approval",
    "partnership",
];

pub const NEGATIVE_KEYWORDS: [&str; 8] = [
    "miss",
    "cut",
    "fine",
    "probe",
    "downgrade",
    "lawsuit",
    "recall",
    "halt",
];

/// Keyword sentiment of a headline. Keywords match anywhere in the lowercased
/// text; a positive hit wins over a negative one.
pub fn classify(headline: &str) -> SentimentLabel {
    let text = headline.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|k| text.contains(k)) {
        SentimentLabel::Positive
    } else if NEGATIVE_KEYWORDS.iter().any(|k| text.contains(k)) {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Items about watched symbols, in source order.
pub fn select(all_news: &[NewsItem], watchlist: &Watchlist) -> Vec<NewsItem> {
    all_news
        .iter()
        .filter(|item| watchlist.contains(&item.symbol))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedNews {
    #[serde(flatten)]
    pub item: NewsItem,
    pub sentiment: SentimentLabel,
}

/// How many items an ingest call kept versus dropped as duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestResult {
    pub items_received: usize,
    pub items_added: usize,
    pub items_deduped: usize,
}

pub struct NewsUseCase {
    items: Vec<NewsItem>,
}

impl NewsUseCase {
    pub fn new(items: Vec<NewsItem>) -> Self {
        let mut uc = Self { items: Vec::new() };
        uc.ingest(items);
        uc
    }

    /// Append items in order, skipping ids already held.
    pub fn ingest(&mut self, items: Vec<NewsItem>) -> IngestResult {
        let mut seen: HashSet<String> = self.items.iter().map(|i| i.id.clone()).collect();
        let mut result = IngestResult {
            items_received: items.len(),
            ..Default::default()
        };
        for item in items {
            if seen.insert(item.id.clone()) {
                self.items.push(item);
                result.items_added += 1;
            } else {
                result.items_deduped += 1;
            }
        }
        result
    }

    pub fn all(&self) -> &[NewsItem] {
        &self.items
    }

    /// Watched-symbol news, each tagged with its sentiment.
    pub fn curated(&self, watchlist: &Watchlist) -> Vec<ClassifiedNews> {
        select(&self.items, watchlist)
            .into_iter()
            .map(|item| ClassifiedNews {
                sentiment: classify(&item.headline),
                item,
            })
            .collect()
    }
}
