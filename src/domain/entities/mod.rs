pub mod alert_rule;
pub mod news_item;
pub mod quote;
