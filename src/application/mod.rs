pub mod alerts;
pub mod news;
pub mod sampler;
pub mod snapshot;
pub mod watchlist;
