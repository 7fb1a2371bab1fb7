//! Drives the AVG command-line scanner.
//!
//! - [`process`]: subprocess execution with a timeout that kills the whole
//!   process group
//! - [`daemon`]: keeps `avgd` running, coordinating restarts with in-flight scans
//! - [`scanner`]: one scan with a single retry, parsed into a [`avg_core::ScanResult`]
//! - [`update`]: virus definition refresh

#![doc(html_root_url = "https://docs.rs/avg-scanner/0.1.0")]

mod config;
mod error;
#[cfg(test)]
mod test_utils;

pub mod daemon;
pub mod process;
pub mod scanner;
pub mod update;

pub use config::ScannerConfig;
pub use daemon::{DaemonController, DaemonGuard, DaemonState};
pub use error::{Result, ScanError};
pub use process::{CommandOutput, CommandRunner, SystemRunner};
pub use scanner::{ScanInvocation, Scanner};
