use clap::Parser;
use std::process;
use strategy_fetcher::cli::{args::Args, commands};
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Cancel the scan scheduler on CTRL+C
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                    signal_token.cancel();
                }
                Err(e) => eprintln!("Failed to install CTRL+C signal handler: {}", e),
            }
        });

        commands::run(args, cancellation_token).await
    });

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Strategy Fetcher - Trading Automation Log Scanner");
    println!("=================================================");
    println!();
    println!("Scans the pipe-delimited log files written by a trading automation");
    println!("process and keeps an in-memory model of accounts and strategies.");
    println!();
    println!("USAGE:");
    println!("    strategy-fetcher <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Scan periodically until interrupted");
    println!("    scan        Run a single scan cycle and print the result");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Scan every 6 hours using a config file:");
    println!("    strategy-fetcher serve --config config/strategy-fetcher.toml --period-hours 6");
    println!();
    println!("    # Print the current model of a directory as JSON:");
    println!("    strategy-fetcher scan --dir /var/lib/trading/logs --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    strategy-fetcher <COMMAND> --help");
}
