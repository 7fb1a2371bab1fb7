//! Scan orchestration: daemon check, scanner run, report parsing, one retry.

use avg_core::{parser, ScanResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ScannerConfig;
use crate::daemon::DaemonController;
use crate::error::{Result, ScanError};
use crate::process::{CommandRunner, SystemRunner};

/// One scan request, alive for a single [`Scanner::scan`] call
#[derive(Debug, Clone)]
pub struct ScanInvocation {
    /// File being scanned
    pub path: PathBuf,
    /// Time budget for each scanner run
    pub timeout: Duration,
    /// Attempts made so far
    pub attempt: u32,
}

impl ScanInvocation {
    /// Start an invocation for `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
            attempt: 0,
        }
    }

    /// Target path as passed to the scanner and matched in its report
    #[must_use]
    pub fn target(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Runs `avgscan` against files, keeping `avgd` alive
pub struct Scanner {
    config: ScannerConfig,
    runner: Arc<dyn CommandRunner>,
    daemon: DaemonController,
}

impl Scanner {
    /// Create a scanner that runs the real AVG binaries
    #[must_use]
    pub fn new(config: ScannerConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    /// Create a scanner with a custom command runner
    #[must_use]
    pub fn with_runner(config: ScannerConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let daemon = DaemonController::new(
            runner.clone(),
            config.daemon_script.clone(),
            config.timeout,
            &config.scan_exit_codes(),
        );
        Self {
            config,
            runner,
            daemon,
        }
    }

    /// Scanner configuration
    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Daemon controller shared by all scans
    #[must_use]
    pub const fn daemon(&self) -> &DaemonController {
        &self.daemon
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    /// Scan the file at `path`
    ///
    /// `path` should be absolute; it is matched verbatim against the
    /// scanner's report. A report that cannot be parsed twice in a row is
    /// returned as a result carrying `error`, not as an `Err`.
    pub async fn scan(&self, path: impl AsRef<Path>) -> Result<ScanResult> {
        let mut invocation = ScanInvocation::new(path.as_ref(), self.config.timeout);

        loop {
            invocation.attempt += 1;
            match self.attempt(&invocation).await {
                Ok(result) => return Ok(self.fill_engine_version(result).await),
                Err(err) if err.is_retryable() && invocation.attempt < self.config.max_attempts => {
                    warn!(
                        plugin = avg_core::PLUGIN_NAME,
                        path = %invocation.path.display(),
                        attempt = invocation.attempt,
                        error = %err,
                        "scan attempt failed, retrying"
                    );
                }
                Err(ScanError::Parse(err)) => {
                    error!(
                        plugin = avg_core::PLUGIN_NAME,
                        path = %invocation.path.display(),
                        error = %err,
                        "giving up on unparsable AVG output"
                    );
                    return Ok(ScanResult::failed(err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt(&self, invocation: &ScanInvocation) -> Result<ScanResult> {
        let target = invocation.target();

        let output = {
            let _daemon = self.daemon.ensure_running().await?;
            self.runner
                .run(&self.config.scanner, &[target.as_str()], invocation.timeout)
                .await?
        };
        debug!(
            plugin = avg_core::PLUGIN_NAME,
            category = avg_core::PLUGIN_CATEGORY,
            path = %target,
            output = %output.output,
            "AVG output"
        );

        let output = output.check(&self.config.scanner, &self.config.scan_exit_codes())?;
        Ok(parser::parse(&output.output, &target)?)
    }

    async fn fill_engine_version(&self, result: ScanResult) -> ScanResult {
        if !result.engine_version.is_empty() {
            return result;
        }
        match self.engine_version().await {
            Ok(version) => result.with_engine_version(version),
            Err(err) => {
                warn!(error = %err, "could not read AVG engine version");
                result
            }
        }
    }

    /// Ask the scanner for its engine version (`avgscan -v`)
    pub async fn engine_version(&self) -> Result<String> {
        let output = self
            .runner
            .run(&self.config.scanner, &["-v"], self.config.timeout)
            .await?
            .check(&self.config.scanner, &self.config.scan_exit_codes())?;
        debug!(output = %output.output, "AVG version");
        Ok(parser::parse_engine_version(&output.output))
    }
}
