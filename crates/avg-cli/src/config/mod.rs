//! Configuration management.
//!
//! Everything is optional and comes from the environment Malice sets up for
//! its plugins; a missing variable disables the matching behavior.

use std::time::Duration;

/// Overrides the sample ID results are filed under.
pub const ENV_SCAN_ID: &str = "MALICE_SCANID";
/// Webhook endpoint for `--callback`.
pub const ENV_ENDPOINT: &str = "MALICE_ENDPOINT";
/// Proxy for the webhook when `--proxy` is given.
pub const ENV_PROXY: &str = "MALICE_PROXY";

/// Plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Sample ID supplied by Malice.
    pub scan_id: Option<String>,

    /// Webhook endpoint URL.
    pub endpoint: Option<String>,

    /// Proxy URL for the webhook.
    pub proxy: Option<String>,

    /// Elasticsearch URL.
    pub elasticsearch: Option<String>,

    /// Scanner timeout.
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, ignoring blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            scan_id: get(ENV_SCAN_ID),
            endpoint: get(ENV_ENDPOINT),
            proxy: get(ENV_PROXY),
            elasticsearch: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Set the scanner timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    /// Set the Elasticsearch URL, ignoring blank values.
    #[must_use]
    pub fn with_elasticsearch(mut self, url: Option<String>) -> Self {
        self.elasticsearch = url.filter(|url| !url.trim().is_empty());
        self
    }
}
