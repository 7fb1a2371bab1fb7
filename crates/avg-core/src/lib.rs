//! Core types for the Malice AVG plugin.
//!
//! This crate holds everything that does not touch a process or a socket:
//!
//! - **Types**: the normalized [`ScanResult`] and its Malice envelope
//! - **Parser**: turns an `avgscan` report into a [`ScanResult`]
//! - **Presenter**: Markdown table and JSON renderings of a result
//! - **Errors**: [`ParseError`] for reports that cannot be understood
//!
//! # Example
//!
//! ```rust,ignore
//! use avg_core::{parser, presenter};
//!
//! let result = parser::parse(&report, "/malware/EICAR")?;
//! println!("{}", presenter::markdown_table(&result));
//! ```

#![doc(html_root_url = "https://docs.rs/avg-core/0.1.0")]

mod error;
pub mod parser;
pub mod presenter;
pub mod types;

pub use error::{ParseError, Result};
pub use types::*;

/// Plugin name reported to Malice.
pub const PLUGIN_NAME: &str = "avg";

/// Plugin category reported to Malice.
pub const PLUGIN_CATEGORY: &str = "av";
