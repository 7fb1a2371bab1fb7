//! Lifecycle of the `avgd` background daemon.
//!
//! `avgscan` talks to `avgd`, so the daemon must be up before every scan.
//! A read-write lock separates the two activities: scans hold shared
//! access while they run, a restart needs exclusive access. Scans against
//! a running daemon therefore proceed concurrently, a restart waits for
//! in-flight scans to drain, and new scans wait for the restart.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use crate::error::{Result, ScanError};
use crate::process::CommandRunner;

/// Observed state of the daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    /// Not probed yet
    Unknown,
    /// Status probe succeeded
    Running,
    /// Status probe reported the daemon stopped
    Down,
}

impl std::fmt::Display for DaemonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Running => write!(f, "running"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Shared access to a running daemon
///
/// While any guard is alive the daemon will not be restarted.
#[must_use = "the daemon may be restarted once the guard is dropped"]
pub struct DaemonGuard<'a> {
    _lifecycle: RwLockReadGuard<'a, ()>,
}

/// Probes and starts `avgd` through its init script
pub struct DaemonController {
    runner: Arc<dyn CommandRunner>,
    script: String,
    timeout: Duration,
    accepted_start_codes: Vec<i32>,
    lifecycle: RwLock<()>,
}

impl DaemonController {
    /// Create a controller for the init script at `script`
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        script: impl Into<String>,
        timeout: Duration,
        accepted_start_codes: &[i32],
    ) -> Self {
        Self {
            runner,
            script: script.into(),
            timeout,
            accepted_start_codes: accepted_start_codes.to_vec(),
            lifecycle: RwLock::new(()),
        }
    }

    /// Make sure the daemon is running and hold it there
    ///
    /// Returns a guard giving shared access for the duration of a scan.
    pub async fn ensure_running(&self) -> Result<DaemonGuard<'_>> {
        let shared = self.lifecycle.read().await;
        if self.probe().await? == DaemonState::Running {
            return Ok(DaemonGuard { _lifecycle: shared });
        }
        drop(shared);

        let exclusive = self.lifecycle.write().await;
        // Another caller may have restarted it while we waited.
        if self.probe().await? == DaemonState::Down {
            self.start().await?;
        }
        Ok(DaemonGuard {
            _lifecycle: exclusive.downgrade(),
        })
    }

    /// Ask the init script for the daemon status
    pub async fn probe(&self) -> Result<DaemonState> {
        let status = self
            .runner
            .run(&self.script, &["status"], self.timeout)
            .await
            .map_err(|e| ScanError::DaemonStart(format!("status probe failed: {e}")))?;

        let state = if status.exited_with(&[0]) {
            DaemonState::Running
        } else {
            DaemonState::Down
        };
        debug!(script = %self.script, %state, "probed AVG daemon");
        Ok(state)
    }

    async fn start(&self) -> Result<()> {
        info!(script = %self.script, "AVG daemon is down, starting it");

        let output = self
            .runner
            .run(&self.script, &["start"], self.timeout)
            .await
            .map_err(|e| ScanError::DaemonStart(e.to_string()))?;
        debug!(output = %output.output, "avgd daemon");

        if output.exited_with(&self.accepted_start_codes) {
            info!("AVG daemon started");
            Ok(())
        } else {
            warn!(code = ?output.code, "AVG daemon failed to start");
            Err(ScanError::DaemonStart(format!(
                "exit status {:?}: {}",
                output.code,
                output.output.trim()
            )))
        }
    }
}
