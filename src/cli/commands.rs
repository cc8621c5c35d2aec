use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "watchpanel", about = "Watchlist quotes, move alerts and curated news")]
pub struct Cli {
    /// Comma-separated symbols to watch (overrides config)
    #[arg(long, global = true, value_delimiter = ',')]
    pub symbols: Option<Vec<String>>,
    /// Refresh interval in milliseconds (overrides config)
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,
    /// Seed for the simulated quote oracle
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample quotes on the refresh interval and print a snapshot per tick
    Watch {
        /// Ticks to print before exiting (0 = until Ctrl-C)
        #[arg(long, default_value = "3")]
        ticks: u64,
        /// Print the quote table as text instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// Refresh once and print the quote table
    Quotes {
        #[arg(long)]
        table: bool,
    },
    /// Refresh once and print rules with the alerts they trigger
    Alerts,
    /// Print news for watched symbols with sentiment labels
    News,
    /// Classify a headline as positive, negative or neutral
    Classify {
        headline: String,
    },
    /// Print the effective configuration
    Config,
}
