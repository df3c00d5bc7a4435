// src/export.rs
// =============================================================================
// This module writes the final report as CSV.
//
// Each result becomes one row with exactly three columns:
//   App-ads Link,Status,Valid Lines
// in the same order as the input list. The csv crate writes the header for
// us from the field names of ReportRow.
// =============================================================================

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::checker::CheckResult;

/// File name suggested when the user doesn't pick one
pub const DEFAULT_CSV_NAME: &str = "app_ads_check_results.csv";

// One CSV row. The serde renames are the column headers.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "App-ads Link")]
    link: &'a str,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "Valid Lines")]
    valid_lines: usize,
}

impl<'a> From<&'a CheckResult> for ReportRow<'a> {
    fn from(result: &'a CheckResult) -> Self {
        ReportRow {
            link: &result.resolved_url,
            status: result.status.label(),
            valid_lines: result.valid_records,
        }
    }
}

// Writes the report to any writer (file, stdout, a Vec in tests)
//
// Returns the number of rows written.
pub fn write_csv<W: Write>(results: &[CheckResult], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if results.is_empty() {
        // serialize() only emits the header alongside the first row
        csv_writer.write_record(["App-ads Link", "Status", "Valid Lines"])?;
    }

    for result in results {
        csv_writer
            .serialize(ReportRow::from(result))
            .with_context(|| format!("Failed to write CSV row for {}", result.resolved_url))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(results.len())
}

// Writes the report to a file, replacing it if it exists
pub fn write_csv_file(results: &[CheckResult], path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_csv(results, file)
}
