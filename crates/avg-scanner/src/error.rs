use avg_core::ParseError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors from driving the scanner and its daemon
#[derive(Error, Debug)]
pub enum ScanError {
    /// The daemon could not be probed or started
    #[error("failed to start AVG daemon: {0}")]
    DaemonStart(String),

    /// The scanner exited with an unexpected status
    #[error("{program} exited with status {code:?}: {output}")]
    Process {
        /// Program that failed
        program: String,
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// The subprocess exceeded its time budget and was killed
    #[error("{program} timed out after {timeout:?}")]
    Timeout {
        /// Program that was killed
        program: String,
        /// Time budget it exceeded
        timeout: Duration,
    },

    /// The subprocess could not be launched
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that could not be launched
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The scanner report could not be understood
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Filesystem I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Returns true if the scan attempt may be repeated
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Process { .. } | Self::Timeout { .. } | Self::Parse(_)
        )
    }

    /// Returns true if the whole invocation must abort
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DaemonStart(_))
    }
}
