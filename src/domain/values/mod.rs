pub mod ack_policy;
pub mod alert_direction;
pub mod reference_prices;
pub mod sentiment;
pub mod symbol;
pub mod watchlist;
