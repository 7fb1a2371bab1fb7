//! Output formatting for different formats.

use malice_avg::{presenter, ScanResult};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"avg": {...}}`
    #[default]
    Json,
    /// Markdown table
    Table,
}

impl OutputFormat {
    /// Pick the format from the `--table` flag.
    #[must_use]
    pub const fn from_table_flag(table: bool) -> Self {
        if table {
            Self::Table
        } else {
            Self::Json
        }
    }

    /// Render a scan result in this format.
    pub fn render(self, result: &ScanResult) -> anyhow::Result<String> {
        match self {
            Self::Json => Ok(presenter::to_json(result)?),
            Self::Table => Ok(presenter::markdown_table(result)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}
