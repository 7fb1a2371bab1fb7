//! # avg-cli
//!
//! Command-line interface and HTTP upload service for the Malice AVG plugin.
//!
//! ## Features
//!
//! - **Scan**: scan a file, print JSON or a Markdown table
//! - **Malice integration**: store results in Elasticsearch, POST them to a webhook
//! - **Update**: refresh AVG virus definitions
//! - **Web**: `POST /scan` upload endpoint

pub mod cli;
pub mod config;
pub mod output;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use cli::run;
