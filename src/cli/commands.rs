//! Command implementations for the strategy fetcher CLI
//!
//! This module contains configuration loading, logging setup and the
//! execution logic of the `serve` and `scan` subcommands.

use crate::app::services::directory_scanner::DirectoryScanner;
use crate::app::services::scheduler::PeriodicScanner;
use crate::app::services::snapshot::{Snapshot, SnapshotStore};
use crate::cli::args::{Args, Commands, CommonArgs, OutputFormat, ScanArgs, ServeArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Main command runner
///
/// `serve` runs until `cancellation_token` is cancelled; `scan` returns
/// after a single cycle.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Serve(serve_args)) => run_serve(serve_args, cancellation_token).await,
        Some(Commands::Scan(scan_args)) => run_scan(scan_args).await,
        None => Err(Error::configuration("No command given")),
    }
}

/// Run the periodic scanner until cancelled
async fn run_serve(args: ServeArgs, cancellation_token: CancellationToken) -> Result<()> {
    args.validate()?;

    let (mut config, source) = Config::load_layered(args.common.config_file.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    setup_logging(&args.common, config.general.log_file.as_deref())?;
    log_config_source(source.as_deref(), &config);

    let store = Arc::new(SnapshotStore::new());
    let scheduler = PeriodicScanner::from_config(&config.scan, Arc::clone(&store))?;

    info!(
        "Starting periodic scan of {} (first cycle in {}s, then every {}h)",
        config.scan.dir.display(),
        config.scan.startup_delay_secs,
        config.scan.period_hours
    );

    scheduler
        .spawn(cancellation_token)
        .await
        .map_err(|e| Error::io("Scan scheduler terminated abnormally", e.into()))?;

    let snapshot = store.snapshot();
    info!(
        "Shut down after {} published snapshots",
        snapshot.generation()
    );
    Ok(())
}

/// Run one scan cycle and print the published snapshot
async fn run_scan(args: ScanArgs) -> Result<()> {
    let (mut config, source) = Config::load_layered(args.common.config_file.as_deref())?;
    args.common.apply_overrides(&mut config);
    config.validate()?;

    setup_logging(&args.common, config.general.log_file.as_deref())?;
    log_config_source(source.as_deref(), &config);

    let scanner = DirectoryScanner::from_config(&config.scan);
    let outcome = tokio::task::spawn_blocking(move || scanner.scan())
        .await
        .map_err(|e| Error::io("Scan task failed", e.into()))??;

    let store = SnapshotStore::new();
    store.publish(outcome.accounts, outcome.stats);
    let snapshot = store.snapshot();

    match args.output_format {
        OutputFormat::Json => print_json(&snapshot),
        OutputFormat::Human => {
            print_summary(&config.scan.dir, &snapshot);
            Ok(())
        }
    }
}

/// Set up structured logging to stderr and, optionally, a log file
fn setup_logging(args: &CommonArgs, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strategy_fetcher={}", log_level)));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::io(format!("Cannot open log file {}", path.display()), e))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("Cannot initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn log_config_source(source: Option<&Path>, config: &Config) {
    match source {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }
    debug!("Loaded configuration: {:?}", config);
}

/// Print the snapshot as pretty JSON
fn print_json(snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| Error::configuration(format!("Failed to serialize snapshot: {}", e)))?;

    println!("{}", json);
    Ok(())
}

/// Print a human-readable summary of the snapshot
fn print_summary(dir: &Path, snapshot: &Snapshot) {
    let stats = snapshot.stats();

    println!("\n{}", "Scan Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Directory:".bright_cyan(),
        dir.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files parsed:".bright_cyan(),
        stats.files_parsed.to_string().bright_white()
    );
    if stats.files_skipped > 0 {
        println!(
            "  {} {}",
            "Files skipped:".bright_red(),
            stats.files_skipped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Records applied:".bright_cyan(),
        stats.records_applied().to_string().bright_white()
    );
    if stats.diagnostics() > 0 {
        println!(
            "  {} {}",
            "Diagnostics:".bright_yellow(),
            stats.diagnostics().to_string().bright_yellow().bold()
        );
    }

    let mut accounts = snapshot.accounts();
    accounts.sort_by(|a, b| a.code.cmp(&b.code));

    println!(
        "  {} {}",
        "Accounts:".bright_cyan(),
        accounts.len().to_string().bright_white().bold()
    );

    for account in accounts {
        println!(
            "\n  {}  balance {:.2}  equity {:.2}",
            account.code.bright_white().bold(),
            account.balance,
            account.equity
        );

        let mut strategies: Vec<_> = account.strategies.values().collect();
        strategies.sort_by(|a, b| a.name.cmp(&b.name));

        for strategy in strategies {
            println!(
                "    {} ({}): {} days, {} trades",
                strategy.name.bright_white(),
                strategy.ticker,
                strategy.daily_info.len(),
                strategy.trades.len()
            );
        }
    }
}
