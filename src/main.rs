use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use watchpanel::application::news::classify;
use watchpanel::application::snapshot::PanelSnapshot;
use watchpanel::cli::commands::{Cli, Commands};
use watchpanel::config::PanelConfig;
use watchpanel::WatchPanel;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match PanelConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(symbols) = cli.symbols {
        config.symbols = symbols;
    }
    if let Some(ms) = cli.interval_ms {
        config.interval_ms = ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(config: PanelConfig, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match &cmd {
        Commands::Classify { headline } => {
            println!("{}", classify(headline));
            return Ok(());
        }
        Commands::Config => {
            print_json(&config)?;
            return Ok(());
        }
        _ => {}
    }

    let mut panel = WatchPanel::new(config)?;

    match cmd {
        Commands::Watch { ticks, table } => {
            let mut updates = panel.subscribe();
            panel.start().await;
            updates.borrow_and_update();
            let mut printed = 0u64;
            loop {
                let snapshot = panel.snapshot();
                print_snapshot(&snapshot, table)?;
                printed += 1;
                if ticks != 0 && printed >= ticks {
                    break;
                }
                tokio::select! {
                    changed = updates.changed() => changed?,
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            panel.stop().await;
        }
        Commands::Quotes { table } => {
            panel.refresh_once().await?;
            print_snapshot(&panel.snapshot(), table)?;
        }
        Commands::Alerts => {
            panel.refresh_once().await?;
            let snapshot = panel.snapshot();
            print_json(&serde_json::json!({
                "rules": snapshot.rules.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
                "triggered": snapshot.triggered,
                "messages": snapshot.triggered.iter().map(|t| t.message()).collect::<Vec<_>>(),
            }))?;
        }
        Commands::News => {
            print_json(&panel.news())?;
        }
        Commands::Classify { .. } | Commands::Config => {}
    }
    Ok(())
}

fn print_snapshot(snapshot: &PanelSnapshot, table: bool) -> Result<(), serde_json::Error> {
    if !table {
        return print_json(snapshot);
    }
    println!("tick {}", snapshot.quotes.tick);
    for row in snapshot.rows() {
        println!("{row}");
    }
    for alert in &snapshot.triggered {
        println!("! {}", alert.message());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
