//! CLI interface for order-tracker

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{self, Config, DisplayConfig};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};
use crate::store::OrderHistoryStore;
use crate::summary::HistorySummary;
use crate::surface::dashboard::{render_full_history, render_next_to_fall_off, render_summary};
use crate::surface::{band_color, paint, Bubble, Dashboard, Handoff};
use crate::types::Decision;

#[derive(Parser)]
#[command(name = "order-tracker")]
#[command(about = "Track order accept/decline decisions over a rolling 100-order window", long_about = None)]
#[command(version)]
struct Cli {
    /// Use a specific config file
    #[arg(long, global = true, env = "ORDER_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Keep history in memory only (nothing is persisted)
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an accepted order
    Accept,
    /// Record a declined order
    Decline,
    /// Show acceptance rate, counts and fall-off prediction
    Status {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the orders next to fall off, or the whole window
    History {
        /// Show every order in the window as a grid
        #[arg(short, long)]
        full: bool,
    },
    /// Clear all order history
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Start the compact floating bubble
    Bubble,
    /// Start the interactive dashboard (default when no command given)
    Dashboard,
    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// Print the default configuration as TOML
        #[arg(long)]
        default: bool,
    },
}

type Store = OrderHistoryStore<Box<dyn KeyValueStore>>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    let mut display = config.display.clone();
    if cli.no_color {
        display.color = false;
    }

    let ephemeral = cli.ephemeral;
    match cli.command {
        Some(Commands::Config { show, path, default }) => {
            if path {
                println!("{}", config_path.display());
            } else if default {
                print!("{}", config::default_config_toml());
            } else if show {
                config::show_config(&config, &config_path)?;
            } else {
                println!("Configuration options:");
                println!("  --show      Display current configuration");
                println!("  --path      Print the config file path");
                println!("  --default   Print the default configuration");
            }
        }
        Some(Commands::Accept) => {
            record(&mut open_store(&config, ephemeral)?, Decision::Accepted, &display)?;
        }
        Some(Commands::Decline) => {
            record(&mut open_store(&config, ephemeral)?, Decision::Declined, &display)?;
        }
        Some(Commands::Status { json }) => {
            show_status(&open_store(&config, ephemeral)?, json, &display)?;
        }
        Some(Commands::History { full }) => {
            show_history(&open_store(&config, ephemeral)?, full, &display)?;
        }
        Some(Commands::Reset { yes }) => {
            reset_history(&mut open_store(&config, ephemeral)?, yes)?;
        }
        Some(Commands::Bubble) => {
            run_surfaces(&mut open_store(&config, ephemeral)?, display, Handoff::Bubble)?;
        }
        Some(Commands::Dashboard) | None => {
            run_surfaces(&mut open_store(&config, ephemeral)?, display, Handoff::Dashboard)?;
        }
    }

    Ok(())
}

/// Open the history store configured for this run
fn open_store(config: &Config, ephemeral: bool) -> Result<Store> {
    let storage: Box<dyn KeyValueStore> = if ephemeral {
        debug!("Using in-memory storage");
        Box::new(MemoryStore::new())
    } else {
        let path = config.storage.resolved_database_path()?;
        let sqlite = SqliteStore::open(&path, &config.storage.namespace)
            .with_context(|| format!("Failed to open preferences database {}", path.display()))?;
        Box::new(sqlite)
    };
    Ok(OrderHistoryStore::with_key(storage, &config.storage.history_key))
}

/// Switch between surfaces until one of them exits
fn run_surfaces(store: &mut Store, display: DisplayConfig, start: Handoff) -> Result<()> {
    let mut next = start;
    loop {
        next = match next {
            Handoff::Dashboard => Dashboard::activate(store, display.clone())?.run()?,
            Handoff::Bubble => Bubble::activate(store, display.clone())?.run()?,
            Handoff::Exit => return Ok(()),
        };
    }
}

fn record(store: &mut Store, decision: Decision, display: &DisplayConfig) -> Result<()> {
    let mut history = store.load()?;
    store.record_decision(&mut history, decision)?;

    let summary = HistorySummary::from(&history);
    println!(
        "{}  AR {}",
        decision.notification(),
        paint(&summary.rate_text(), band_color(summary.band), display.color)
    );
    Ok(())
}

fn show_status(store: &Store, json: bool, display: &DisplayConfig) -> Result<()> {
    let history = store.load()?;
    let summary = HistorySummary::from(&history);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary, display));
    }
    Ok(())
}

fn show_history(store: &Store, full: bool, display: &DisplayConfig) -> Result<()> {
    let history = store.load()?;
    if full {
        print!("{}", render_full_history(&history, display));
    } else {
        print!("{}", render_next_to_fall_off(&history, display));
    }
    Ok(())
}

fn reset_history(store: &mut Store, skip_confirm: bool) -> Result<()> {
    let mut history = store.load()?;

    if history.is_empty() {
        println!("No order history found.");
        return Ok(());
    }

    if !skip_confirm {
        let prompt = format!(
            "This will delete ALL {} tracked order(s). This action cannot be undone.",
            history.len()
        );
        if !crate::surface::confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset(&mut history)?;
    println!("History cleared");
    Ok(())
}
