//! Malice plugin wrapping the AVG command-line antivirus scanner.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use malice_avg::{presenter, Scanner, ScannerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = Scanner::new(ScannerConfig::default());
//!
//!     let result = scanner.scan("/malware/EICAR").await?;
//!     println!("{}", presenter::markdown_table(&result));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/malice-avg/0.1.0")]

// Re-export core types
pub use avg_core::*;

// Re-export the scanner driver
pub use avg_scanner::{
    daemon, process, CommandOutput, CommandRunner, DaemonController, DaemonGuard, DaemonState,
    ScanError, ScanInvocation, Scanner, ScannerConfig, SystemRunner,
};

// Re-export collaborators
pub use avg_client::{
    sample, ClientError, ElasticsearchStore, HttpConfig, WebhookClient, MALICE_ID_HEADER,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
