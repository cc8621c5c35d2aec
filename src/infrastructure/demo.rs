//! Demo data the panel starts with when no configuration is supplied.

use crate::domain::entities::alert_rule::AlertRule;
use crate::domain::entities::news_item::NewsItem;
use crate::domain::values::symbol::Symbol;
use chrono::Utc;
use std::collections::HashMap;

pub const DEMO_SYMBOLS: [&str; 7] = ["BP-TR", "PLTR", "TMUS", "A0MM0S", "A1C5E7", "A1KWPQ", "A113FD"];

const DEMO_PRICES: [(&str, f64); 7] = [
    ("BP-TR", 4.9),
    ("PLTR", 159.2),
    ("TMUS", 210.1),
    ("A0MM0S", 64.7),
    ("A1C5E7", 100.0),
    ("A1KWPQ", 56.6),
    ("A113FD", 42.6),
];

pub fn demo_symbols() -> Vec<String> {
    DEMO_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

pub fn demo_reference_prices() -> HashMap<String, f64> {
    DEMO_PRICES
        .iter()
        .map(|(s, p)| (s.to_string(), *p))
        .collect()
}

pub fn demo_rules() -> Vec<AlertRule> {
    [("PLTR", 2.0), ("BP-TR", -1.0)]
        .into_iter()
        .filter_map(|(s, t)| Symbol::parse(s).ok().map(|sym| AlertRule::new(sym, t)))
        .collect()
}

pub fn demo_news() -> Vec<NewsItem> {
    let now = Utc::now();
    [
        (
            "n1",
            "PLTR",
            "Palantir signs EU partnership to expand AI solutions",
            "DemoWire",
        ),
        (
            "n2",
            "TMUS",
            "T-Mobile unveils new 5G enterprise features; analysts see upside",
            "DemoNews",
        ),
        (
            "n3",
            "BP-TR",
            "BP outlines low-carbon roadmap; refining margins in focus",
            "EnergyDaily",
        ),
    ]
    .into_iter()
    .filter_map(|(id, sym, headline, source)| {
        Symbol::parse(sym).ok().map(|symbol| NewsItem {
            id: id.to_string(),
            symbol,
            headline: headline.to_string(),
            url: "#".to_string(),
            timestamp: now,
            source: source.to_string(),
        })
    })
    .collect()
}
