use serde::{Deserialize, Serialize};

/// Normalized outcome of one `avgscan` run
///
/// Field names follow the Malice wire format, so `signature` travels as
/// `result`, `engine_version` as `engine` and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Whether the scanner reported at least one infection
    pub infected: bool,

    /// Verdict text from the detection line (threat name)
    #[serde(rename = "result", default)]
    pub signature: String,

    /// Scanner engine version
    #[serde(rename = "engine", default)]
    pub engine_version: String,

    /// Virus database version
    #[serde(rename = "database", default)]
    pub database_version: String,

    /// Virus database release date as `YYYYMMDD`
    #[serde(rename = "updated", default)]
    pub database_updated_date: String,

    /// Rendered Markdown table, only carried to the document store
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub markdown: String,

    /// Set when the scan completed but its report could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Build a result that only records a failure
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Returns a copy with the engine version set
    #[must_use]
    pub fn with_engine_version(self, engine_version: impl Into<String>) -> Self {
        Self {
            engine_version: engine_version.into(),
            ..self
        }
    }

    /// Returns a copy carrying the rendered Markdown table
    #[must_use]
    pub fn with_markdown(self, markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..self
        }
    }

    /// Returns a copy without the Markdown table
    #[must_use]
    pub fn without_markdown(self) -> Self {
        Self {
            markdown: String::new(),
            ..self
        }
    }

    /// Returns true if the report could not be parsed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Flatten into a JSON object, keyed the same way as the JSON output
    #[must_use]
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Malice envelope: `{"avg": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvgResults {
    /// Results of the scan
    #[serde(rename = "avg")]
    pub results: ScanResult,
}

impl From<ScanResult> for AvgResults {
    fn from(results: ScanResult) -> Self {
        Self { results }
    }
}
