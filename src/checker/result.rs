// src/checker/result.rs
// =============================================================================
// The values the checker hands back to the rest of the program.
//
// - CheckStatus: what we concluded about one domain
// - FetchOutcome: what the fetcher found for one host (URL, status, count)
// - CheckResult: a FetchOutcome plus where it came from in the input list
//
// Rust concepts:
// - #[serde(rename = ...)]: Control the exact text written to JSON/CSV
// - Copy types: Small enums can be copied instead of moved
// =============================================================================

use serde::{Deserialize, Serialize};

/// Result of checking one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// File found with at least one DIRECT/RESELLER record
    #[serde(rename = "Valid")]
    Valid,
    /// File found but it has no valid records
    #[serde(rename = "Valid (Empty)")]
    ValidEmpty,
    /// No candidate URL produced a usable file
    #[serde(rename = "Error / Not Found")]
    Error,
}

impl CheckStatus {
    /// The label used in the table and the CSV export
    pub fn label(self) -> &'static str {
        match self {
            CheckStatus::Valid => "Valid",
            CheckStatus::ValidEmpty => "Valid (Empty)",
            CheckStatus::Error => "Error / Not Found",
        }
    }
}

/// What the fetcher found for a single host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub resolved_url: String,
    pub status: CheckStatus,
    pub valid_records: usize,
}

impl FetchOutcome {
    // A file was fetched from `url`. Zero records is still a found file.
    pub fn found(url: impl Into<String>, valid_records: usize) -> Self {
        let status = if valid_records > 0 {
            CheckStatus::Valid
        } else {
            CheckStatus::ValidEmpty
        };

        FetchOutcome {
            resolved_url: url.into(),
            status,
            valid_records,
        }
    }

    // Nothing could be fetched. `display_url` is only shown to the user.
    pub fn not_found(display_url: impl Into<String>) -> Self {
        FetchOutcome {
            resolved_url: display_url.into(),
            status: CheckStatus::Error,
            valid_records: 0,
        }
    }
}

/// One row of the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Position of the domain in the input (blank lines don't count)
    pub original_index: usize,
    /// The line exactly as the user gave it
    pub input: String,
    /// The normalized host we checked
    pub host: String,
    pub resolved_url: String,
    pub status: CheckStatus,
    pub valid_records: usize,
}

impl CheckResult {
    /// True when a file was found, even an empty one
    pub fn is_ok(&self) -> bool {
        matches!(self.status, CheckStatus::Valid | CheckStatus::ValidEmpty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_with_records_is_valid() {
        let outcome = FetchOutcome::found("https://example.com/app-ads.txt", 3);
        assert_eq!(outcome.status, CheckStatus::Valid);
        assert_eq!(outcome.valid_records, 3);
    }

    #[test]
    fn test_found_without_records_is_empty_not_error() {
        let outcome = FetchOutcome::found("https://example.com/app-ads.txt", 0);
        assert_eq!(outcome.status, CheckStatus::ValidEmpty);
    }

    #[test]
    fn test_not_found() {
        let outcome = FetchOutcome::not_found("https://example.com/app-ads.txt");
        assert_eq!(outcome.status, CheckStatus::Error);
        assert_eq!(outcome.valid_records, 0);
    }

    #[test]
    fn test_status_serializes_to_report_labels() {
        for status in [CheckStatus::Valid, CheckStatus::ValidEmpty, CheckStatus::Error] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.label()));
        }
    }

    #[test]
    fn test_is_ok() {
        let mut result = CheckResult {
            original_index: 0,
            input: "example.com".to_string(),
            host: "example.com".to_string(),
            resolved_url: "https://example.com/app-ads.txt".to_string(),
            status: CheckStatus::ValidEmpty,
            valid_records: 0,
        };
        assert!(result.is_ok());

        result.status = CheckStatus::Error;
        assert!(!result.is_ok());
    }
}
