//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Malice AVG AntiVirus Plugin
///
/// Scans files with the AVG command-line scanner and reports the
/// result as JSON or a Markdown table.
#[derive(Parser, Debug)]
#[command(name = "avg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Malice plugin timeout (in seconds)
    #[arg(long, env = "MALICE_TIMEOUT", default_value_t = 120, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a file for malware
    Scan(ScanArgs),

    /// Update virus definitions
    Update,

    /// Create an AVG scan web service
    Web(WebArgs),
}

// ============================================================================
// Scan command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// File to scan
    pub file: PathBuf,

    /// Output as Markdown table
    #[arg(short, long)]
    pub table: bool,

    /// POST results back to the Malice webhook (MALICE_ENDPOINT)
    #[arg(short, long)]
    pub callback: bool,

    /// Route the webhook through the Malice proxy (MALICE_PROXY)
    #[arg(short = 'x', long)]
    pub proxy: bool,

    /// Elasticsearch address for Malice to store results
    #[arg(long, env = "MALICE_ELASTICSEARCH")]
    pub elasticsearch: Option<String>,
}

// ============================================================================
// Web command
// ============================================================================

#[derive(Args, Debug)]
pub struct WebArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3993")]
    pub addr: SocketAddr,

    /// Directory uploaded samples are written to while scanned
    #[arg(long, env = "MALICE_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_flags() {
        let cli = Cli::try_parse_from(["avg", "scan", "-t", "-c", "-x", "/malware/EICAR"]).unwrap();
        let Commands::Scan(args) = cli.command else {
            panic!("expected scan command");
        };
        assert!(args.table);
        assert!(args.callback);
        assert!(args.proxy);
        assert_eq!(args.file, PathBuf::from("/malware/EICAR"));
    }

    #[test]
    fn test_global_timeout() {
        let cli = Cli::try_parse_from(["avg", "update", "--timeout", "30"]).unwrap();
        assert_eq!(cli.timeout, 30);
        assert!(matches!(cli.command, Commands::Update));
    }

    #[test]
    fn test_web_defaults() {
        let cli = Cli::try_parse_from(["avg", "web"]).unwrap();
        let Commands::Web(args) = cli.command else {
            panic!("expected web command");
        };
        assert_eq!(args.addr.port(), 3993);
    }

    #[test]
    fn test_scan_requires_file() {
        assert!(Cli::try_parse_from(["avg", "scan"]).is_err());
    }
}
