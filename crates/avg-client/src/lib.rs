//! HTTP collaborators for the Malice AVG plugin.
//!
//! - [`ElasticsearchStore`] upserts plugin results into the Malice index
//! - [`WebhookClient`] relays results to the Malice callback endpoint
//! - [`sample`] derives the sample ID results are filed under

#![doc(html_root_url = "https://docs.rs/avg-client/0.1.0")]

mod config;
mod error;
mod store;
mod webhook;
pub mod sample;

pub use config::HttpConfig;
pub use error::{ClientError, Result};
pub use store::ElasticsearchStore;
pub use webhook::{WebhookClient, MALICE_ID_HEADER};
