//! avg - Malice AVG antivirus plugin
//!
//! Scans files with the AVG command-line scanner and reports the result.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    avg_cli::run().await
}
