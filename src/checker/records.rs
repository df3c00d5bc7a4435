// src/checker/records.rs
// =============================================================================
// This module counts the valid records in an app-ads.txt file.
//
// An IAB record looks like:
//   google.com, pub-0000000000000000, DIRECT, f08c47fec0942fa0
//   <ad system>, <publisher account id>, <relationship>[, <cert authority id>]
//
// Real files are messy: Windows line endings, a byte-order mark at the start,
// comments after '#', odd spacing, and sometimes invisible characters pasted
// into the relationship field. We accept all of that and only check the part
// that matters: the third field must be DIRECT or RESELLER.
//
// Lines like "contact=ads@example.com" or "subdomain=games.example.com" are
// variables, not records. They don't count as valid and aren't errors either.
//
// Rust concepts:
// - Iterators: lines(), split(), filter(), count()
// - Pure functions: same input always gives the same output
// =============================================================================

const VALID_RELATIONSHIPS: [&str; 2] = ["DIRECT", "RESELLER"];

/// Breakdown of the non-empty lines of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSummary {
    /// Lines with a DIRECT or RESELLER relationship
    pub valid_records: usize,
    /// Non-comment lines that aren't valid records (variables, typos, ...)
    pub other_lines: usize,
}

// Counts the valid IAB records in the file content
//
// Example:
//   count_valid_records("a.com, pub-1, DIRECT\n# comment\n") -> 1
pub fn count_valid_records(content: &str) -> usize {
    summarize_records(content).valid_records
}

// Walks every line once and sorts it into valid / other / skipped
pub fn summarize_records(content: &str) -> RecordSummary {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut summary = RecordSummary::default();

    for line in normalized.split('\n') {
        let data = strip_comment(line);
        if data.is_empty() {
            continue;
        }

        if is_valid_record(data) {
            summary.valid_records += 1;
        } else {
            summary.other_lines += 1;
        }
    }

    summary
}

// Everything before the first '#', trimmed
fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}

fn is_valid_record(data: &str) -> bool {
    let fields: Vec<&str> = data.split(',').map(str::trim).collect();

    if fields.len() < 3 {
        return false;
    }

    let relationship = relationship_letters(fields[2]);
    VALID_RELATIONSHIPS.contains(&relationship.as_str())
}

// Upper-cases the field and throws away anything that isn't A-Z
//
// " d i r e c t\u{00a0}" -> "DIRECT"
fn relationship_letters(field: &str) -> String {
    field
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}
