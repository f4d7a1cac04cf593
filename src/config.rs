//! Configuration management and validation.
//!
//! Provides the TOML-backed configuration for the scan directory, scan
//! period and log output, with a layered lookup:
//! explicit file -> local `config/` file -> user config dir -> defaults.

use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_FILE_SUFFIX, DEFAULT_SCAN_DIR,
    DEFAULT_SCAN_PERIOD_HOURS, DEFAULT_STARTUP_DELAY_SECS, LOCAL_CONFIG_FILE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scan: ScanConfig,
}

/// Process-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Optional file that receives a copy of every log line
    pub log_file: Option<PathBuf>,
}

/// Scan cycle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory holding the log files
    pub dir: PathBuf,

    /// Hours between two scan cycles
    pub period_hours: u64,

    /// Only files whose name ends with this suffix are parsed
    pub file_suffix: String,

    /// Seconds to wait before the first cycle
    pub startup_delay_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_SCAN_DIR),
            period_hours: DEFAULT_SCAN_PERIOD_HOURS,
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            startup_delay_secs: DEFAULT_STARTUP_DELAY_SECS,
        }
    }
}

impl ScanConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_hours.saturating_mul(3600))
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| Error::config_parse(path, e))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Path of the per-user config file, if a config directory exists
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// Locate the config file to use
    ///
    /// An explicit path must exist; otherwise the local and per-user
    /// locations are tried in order.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        Ok(Self::default_config_path().filter(|path| path.exists()))
    }

    /// Load configuration using the layered lookup, falling back to defaults
    ///
    /// Returns the configuration together with the file it came from.
    pub fn load_layered(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match Self::resolve_path(explicit)? {
            Some(path) => Ok((Self::load_from_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.scan.period_hours == 0 {
            return Err(Error::configuration(
                "scan.period_hours must be greater than zero",
            ));
        }

        if self.scan.file_suffix.is_empty() {
            return Err(Error::configuration("scan.file_suffix must not be empty"));
        }

        if self.scan.dir.as_os_str().is_empty() {
            return Err(Error::configuration("scan.dir must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.dir, PathBuf::from("data"));
        assert_eq!(config.scan.file_suffix, ".log");
        assert_eq!(config.scan.period(), Duration::from_secs(3600));
        assert_eq!(config.scan.startup_delay(), Duration::from_secs(2));
        assert!(config.general.log_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config(
            r#"
[scan]
dir = "/var/lib/trading/logs"
period_hours = 6
"#,
        );

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.scan.dir, PathBuf::from("/var/lib/trading/logs"));
        assert_eq!(config.scan.period(), Duration::from_secs(6 * 3600));
        assert_eq!(config.scan.file_suffix, ".log");
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
[general]
log_file = "fetcher.log"

[scan]
dir = "in"
period_hours = 1
file_suffix = ".txt"
startup_delay_secs = 0
"#,
        );

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.general.log_file, Some(PathBuf::from("fetcher.log")));
        assert_eq!(config.scan.file_suffix, ".txt");
        assert_eq!(config.scan.startup_delay(), Duration::ZERO);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("[scan]\nperiod_hours = \"often\"\n");

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let result = Config::load_layered(Some(Path::new("/nonexistent/strategy-fetcher.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_explicit_path_is_used() {
        let file = write_config("[scan]\nfile_suffix = \".trades\"\n");

        let (config, source) = Config::load_layered(Some(file.path())).unwrap();
        assert_eq!(source.as_deref(), Some(file.path()));
        assert_eq!(config.scan.file_suffix, ".trades");
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let mut config = Config::default();
        config.scan.period_hours = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.file_suffix.clear();
        assert!(config.validate().is_err());
    }
}
