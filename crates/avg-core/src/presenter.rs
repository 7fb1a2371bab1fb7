//! Markdown and JSON renderings of a [`ScanResult`].

use crate::types::{AvgResults, ScanResult};

/// Render the fixed four column Markdown table shown by `avg scan --table`.
#[must_use]
pub fn markdown_table(result: &ScanResult) -> String {
    format!(
        "#### AVG\n\
         | Infected      | Result      | Engine      | Updated      |\n\
         |:-------------:|:-----------:|:-----------:|:------------:|\n\
         | {} | {} | {} | {} |\n",
        result.infected, result.signature, result.engine_version, result.database_updated_date,
    )
}

/// Render `{"avg": {...}}` without the Markdown table.
pub fn to_json(result: &ScanResult) -> serde_json::Result<String> {
    serde_json::to_string(&AvgResults::from(result.clone().without_markdown()))
}

/// Pretty-printed variant of [`to_json`].
pub fn to_json_pretty(result: &ScanResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&AvgResults::from(result.clone().without_markdown()))
}

/// Read back a document produced by [`to_json`].
pub fn from_json(json: &str) -> serde_json::Result<ScanResult> {
    serde_json::from_str::<AvgResults>(json).map(|wrapped| wrapped.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infected() -> ScanResult {
        ScanResult {
            infected: true,
            signature: "Virus identified EICAR_Test".to_string(),
            engine_version: "13.0.3118".to_string(),
            database_version: "4793/15563".to_string(),
            database_updated_date: "20160301".to_string(),
            markdown: String::new(),
            error: None,
        }
    }

    #[test]
    fn test_markdown_table() {
        let table = markdown_table(&infected());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "#### AVG");
        assert_eq!(
            lines[1],
            "| Infected      | Result      | Engine      | Updated      |"
        );
        assert_eq!(
            lines[3],
            "| true | Virus identified EICAR_Test | 13.0.3118 | 20160301 |"
        );
    }

    #[test]
    fn test_json_round_trip_drops_markdown() {
        let original = infected().with_markdown(markdown_table(&infected()));
        let json = to_json(&original).unwrap();
        assert!(!json.contains("markdown"));
        assert!(!json.contains("error"));

        let parsed = from_json(&json).unwrap();
        assert_eq!(parsed, original.without_markdown());
    }

    #[test]
    fn test_json_keeps_error() {
        let failed = ScanResult::failed("unable to parse AVG output");
        let json = to_json(&failed).unwrap();
        let parsed = from_json(&json).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("unable to parse AVG output"));
    }

    #[test]
    fn test_pretty_json_is_enveloped() {
        let json = to_json_pretty(&infected()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["avg"]["result"], "Virus identified EICAR_Test");
    }
}
