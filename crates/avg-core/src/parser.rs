//! Line-oriented parser for `avgscan` reports.
//!
//! The report is free text. Two kinds of lines matter:
//!
//! - the detection line, which starts with the scanned path and carries the
//!   verdict after a double space (`/malware/EICAR  Virus identified EICAR_Test`)
//! - metadata lines of the form `label: value`
//!
//! Metadata labels are matched by substring against [`FIELD_EXTRACTORS`].

use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

use crate::error::{ParseError, Result};
use crate::types::ScanResult;

/// Separator between the path and the verdict on a detection line.
const VERDICT_SEPARATOR: &str = "  ";

/// Layout of the database release date, e.g. `Mon, 02 Jan 2006 15:04:05 +0000`.
const RELEASE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

type Extractor = fn(&mut ScanResult, &str);

/// Known metadata labels and how each one fills a [`ScanResult`].
///
/// The first label found in a line wins.
pub const FIELD_EXTRACTORS: &[(&str, Extractor)] = &[
    ("Virus database version", extract_database_version),
    ("Virus database release date", extract_release_date),
    ("Infections found", extract_infections),
    ("Anti-Virus scanner version", extract_engine_version),
];

/// Parse an `avgscan` report for `target_path`.
///
/// Fails only when the report contains no `label: value` line at all.
pub fn parse(raw_output: &str, target_path: &str) -> Result<ScanResult> {
    debug!(output = raw_output, "AVG output");

    let mut result = ScanResult::default();
    let mut metadata = Vec::new();

    for line in raw_output.lines().filter(|line| !line.is_empty()) {
        if line.contains(':') {
            metadata.push(line);
        }
        if !target_path.is_empty() && line.contains(target_path) {
            result.signature = verdict(line).unwrap_or_else(|| {
                warn!(line, "detection line has no verdict separator");
                String::new()
            });
        }
    }

    if metadata.is_empty() {
        error!(output = raw_output, "AVG output has no metadata lines");
        return Err(ParseError::UnparsableOutput {
            raw: raw_output.to_string(),
        });
    }

    apply_metadata(&mut result, &metadata);
    Ok(result)
}

/// Extract the engine version from `avgscan -v` output.
#[must_use]
pub fn parse_engine_version(raw_output: &str) -> String {
    let metadata: Vec<&str> = raw_output
        .lines()
        .filter(|line| !line.is_empty() && line.contains(':'))
        .collect();

    let mut result = ScanResult::default();
    apply_metadata(&mut result, &metadata);
    result.engine_version
}

/// Reformat a release date such as `Tue, 01 Mar 2016 16:56:00 +0000` as `20160301`.
///
/// Returns an empty string if the date does not match the expected layout.
#[must_use]
pub fn format_release_date(date: &str) -> String {
    NaiveDateTime::parse_from_str(date.trim(), RELEASE_DATE_FORMAT)
        .map(|t| t.format("%Y%m%d").to_string())
        .unwrap_or_default()
}

fn apply_metadata(result: &mut ScanResult, lines: &[&str]) {
    for line in lines {
        if let Some((_, extract)) = FIELD_EXTRACTORS
            .iter()
            .find(|(label, _)| line.contains(label))
        {
            extract(result, line);
        }
    }
}

fn verdict(line: &str) -> Option<String> {
    line.split(VERDICT_SEPARATOR)
        .nth(1)
        .map(|v| v.trim().to_string())
}

fn extract_database_version(result: &mut ScanResult, line: &str) {
    if let Some((_, value)) = line.rsplit_once(':') {
        result.database_version = value.trim().to_string();
    }
}

fn extract_release_date(result: &mut ScanResult, line: &str) {
    if let Some((_, value)) = line.split_once(':') {
        result.database_updated_date = format_release_date(value);
    }
}

// Any "1" in the count marks the sample infected, so "10" and "21" do too.
fn extract_infections(result: &mut ScanResult, line: &str) {
    if line.split(':').nth(1).is_some_and(|count| count.contains('1')) {
        result.infected = true;
    }
}

fn extract_engine_version(result: &mut ScanResult, line: &str) {
    if let Some((_, value)) = line.split_once(':') {
        result.engine_version = value.trim().to_string();
    }
}
