//! Scanner configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Default scan timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Locations and policies for driving AVG
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Command-line scanner binary
    pub scanner: String,

    /// Init script controlling `avgd`
    pub daemon_script: String,

    /// Definitions updater binary
    pub updater: String,

    /// File stamped with the date of the last definitions update
    pub updated_stamp: PathBuf,

    /// Time budget for each subprocess
    pub timeout: Duration,

    /// Time budget for a definitions update
    pub update_timeout: Duration,

    /// Attempts per scan, including the first
    pub max_attempts: u32,

    /// Exit code the scanner uses to report an infection
    pub infected_exit_code: i32,

    /// Exit code the updater uses when definitions are already current
    pub up_to_date_exit_code: i32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scanner: "/usr/bin/avgscan".to_string(),
            daemon_script: "/etc/init.d/avgd".to_string(),
            updater: "avgupdate".to_string(),
            updated_stamp: PathBuf::from("/opt/malice/UPDATED"),
            timeout: DEFAULT_TIMEOUT,
            update_timeout: Duration::from_secs(600),
            max_attempts: 2,
            infected_exit_code: 5,
            up_to_date_exit_code: 2,
        }
    }
}

impl ScannerConfig {
    /// Create a configuration with the stock AVG paths
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scanner binary
    #[must_use]
    pub fn scanner(mut self, program: impl Into<String>) -> Self {
        self.scanner = program.into();
        self
    }

    /// Set the daemon init script
    #[must_use]
    pub fn daemon_script(mut self, script: impl Into<String>) -> Self {
        self.daemon_script = script.into();
        self
    }

    /// Set the definitions updater binary
    #[must_use]
    pub fn updater(mut self, program: impl Into<String>) -> Self {
        self.updater = program.into();
        self
    }

    /// Set the update stamp file
    #[must_use]
    pub fn updated_stamp(mut self, path: impl Into<PathBuf>) -> Self {
        self.updated_stamp = path.into();
        self
    }

    /// Set the per-subprocess timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the definitions update timeout
    #[must_use]
    pub const fn update_timeout(mut self, timeout: Duration) -> Self {
        self.update_timeout = timeout;
        self
    }

    /// Set the number of attempts per scan (at least one)
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = if attempts == 0 { 1 } else { attempts };
        self
    }

    /// Exit codes the scanner may return for a completed scan
    #[must_use]
    pub const fn scan_exit_codes(&self) -> [i32; 2] {
        [0, self.infected_exit_code]
    }

    /// Exit codes the updater may return for a completed update
    #[must_use]
    pub const fn update_exit_codes(&self) -> [i32; 2] {
        [0, self.up_to_date_exit_code]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScannerConfig::default();
        assert_eq!(config.scanner, "/usr/bin/avgscan");
        assert_eq!(config.daemon_script, "/etc/init.d/avgd");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.scan_exit_codes(), [0, 5]);
        assert_eq!(config.update_exit_codes(), [0, 2]);
    }

    #[test]
    fn test_builder() {
        let config = ScannerConfig::new()
            .scanner("/opt/avg/avgscan")
            .timeout(Duration::from_secs(60))
            .max_attempts(0);
        assert_eq!(config.scanner, "/opt/avg/avgscan");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_attempts, 1);
    }
}
