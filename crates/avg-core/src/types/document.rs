use serde::{Deserialize, Serialize};

use super::ScanResult;
use crate::{PLUGIN_CATEGORY, PLUGIN_NAME};

/// Plugin output as stored in the Malice document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDocument {
    /// Sample ID: the SHA-256 of the scanned file or `MALICE_SCANID`
    pub id: String,

    /// Plugin name (`avg`)
    pub name: String,

    /// Plugin category (`av`)
    pub category: String,

    /// Flattened scan result
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl PluginDocument {
    /// Wrap a scan result for the given sample ID
    #[must_use]
    pub fn new(id: impl Into<String>, result: &ScanResult) -> Self {
        Self {
            id: id.into(),
            name: PLUGIN_NAME.to_string(),
            category: PLUGIN_CATEGORY.to_string(),
            data: result.to_map(),
        }
    }
}
