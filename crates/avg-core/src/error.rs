use thiserror::Error;

/// Result type alias for report parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while reading an `avgscan` report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The report carried no `label: value` lines at all
    #[error("unable to parse AVG output")]
    UnparsableOutput {
        /// The report as received, kept for diagnostics
        raw: String,
    },
}

impl ParseError {
    /// Returns the raw scanner output that failed to parse
    #[must_use]
    pub fn raw_output(&self) -> &str {
        match self {
            Self::UnparsableOutput { raw } => raw,
        }
    }
}
