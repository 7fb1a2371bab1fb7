//! Command implementations.

pub mod scan;
pub mod update;
pub mod web;

use malice_avg::{CommandRunner, Scanner, ScannerConfig, SystemRunner};
use std::sync::Arc;

use crate::config::Config;

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// Environment and flag configuration
    pub config: Config,

    /// Verbose output
    pub verbose: bool,

    /// Runs `avgscan`, `avgd` and `avgupdate`
    pub runner: Arc<dyn CommandRunner>,
}

impl Context {
    /// Context running the AVG tools installed on the host.
    pub fn new(config: Config, verbose: bool) -> Self {
        Self {
            config,
            verbose,
            runner: Arc::new(SystemRunner),
        }
    }

    /// Swap the command runner.
    #[must_use]
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Create a scanner honoring the configured timeout.
    pub fn scanner(&self) -> Scanner {
        Scanner::with_runner(
            ScannerConfig::new().timeout(self.config.timeout),
            self.runner.clone(),
        )
    }
}
