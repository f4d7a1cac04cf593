//! Command-line argument definitions for the strategy fetcher
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the strategy fetcher
///
/// Scans the log files written by a trading automation process and keeps
/// an in-memory model of accounts, strategies, daily results and trades.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "strategy-fetcher",
    version,
    about = "Scan trading automation log files into an account/strategy model",
    long_about = "Periodically scans a directory of append-only, pipe-delimited log files \
                  produced by a trading automation process and publishes the accounts, \
                  strategies, daily performance and trades they describe as an atomic \
                  in-memory snapshot."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Scan periodically until interrupted
    Serve(ServeArgs),
    /// Run a single scan cycle and print the result
    Scan(ScanArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ./config/strategy-fetcher.toml, then the per-user config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory to scan, overriding the configuration
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// File name suffix selecting the files to parse, overriding the configuration
    #[arg(short = 's', long = "suffix", value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", help = "Only show errors")]
    pub quiet: bool,
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Hours between scan cycles, overriding the configuration
    #[arg(long = "period-hours", value_name = "HOURS")]
    pub period_hours: Option<u64>,

    /// Seconds before the first scan cycle, overriding the configuration
    #[arg(long = "startup-delay", value_name = "SECONDS")]
    pub startup_delay_secs: Option<u64>,
}

/// Arguments for the scan command
#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output format for the scan result
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Output format for the scan result"
    )]
    pub output_format: OutputFormat,
}

/// Output formats for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON snapshot for scripting
    Json,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply directory and suffix overrides to a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.dir {
            config.scan.dir = dir.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.scan.file_suffix = suffix.clone();
        }
    }
}

impl ServeArgs {
    /// Validate the serve command arguments
    pub fn validate(&self) -> Result<()> {
        if self.period_hours == Some(0) {
            return Err(Error::configuration(
                "Period must be at least one hour".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply all serve overrides to a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        self.common.apply_overrides(config);
        if let Some(period_hours) = self.period_hours {
            config.scan.period_hours = period_hours;
        }
        if let Some(startup_delay_secs) = self.startup_delay_secs {
            config.scan.startup_delay_secs = startup_delay_secs;
        }
    }
}
