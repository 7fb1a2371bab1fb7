//! Subprocess execution with a hard timeout.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Result, ScanError};

/// Exit status and combined output of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    /// Create an output record
    #[must_use]
    pub fn new(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    /// Returns true if the command exited with one of `accepted`
    #[must_use]
    pub fn exited_with(&self, accepted: &[i32]) -> bool {
        self.code.is_some_and(|code| accepted.contains(&code))
    }

    /// Turn an unexpected exit status into [`ScanError::Process`]
    pub fn check(self, program: &str, accepted: &[i32]) -> Result<Self> {
        if self.exited_with(accepted) {
            Ok(self)
        } else {
            Err(ScanError::Process {
                program: program.to_string(),
                code: self.code,
                output: self.output,
            })
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Self {
            code: output.status.code(),
            output: text,
        }
    }
}

/// Runs external programs
///
/// A non-zero exit is not an error at this level; callers decide which
/// codes are acceptable.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, killing it once `timeout` elapses
    async fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput>;
}

/// Runs commands on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|source| ScanError::Spawn {
            program: program.to_string(),
            source,
        })?;
        let pid = child.id();

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => Ok(CommandOutput::from(output?)),
            Err(_) => {
                warn!(program, ?timeout, "command timed out, killing process group");
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                Err(ScanError::Timeout {
                    program: program.to_string(),
                    timeout,
                })
            }
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        debug!(pid, error = %e, "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}
