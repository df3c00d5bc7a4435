// src/checker/mod.rs
// =============================================================================
// This module contains everything needed to check one domain.
//
// Submodules:
// - normalize: Turns a pasted line into a bare host name
// - candidates: Builds the list of app-ads.txt URLs to try for a host
// - fetch: Downloads the file, with retry and soft-404 rules
// - records: Counts the valid IAB records in a file
// - result: Status and result types shared with the rest of the program
// - error: Why a single attempt failed
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod candidates;
mod error;
mod fetch;
mod normalize;
mod records;
mod result;

// Re-export public items from submodules
// This lets users write `checker::normalize_domain()` instead of
// `checker::normalize::normalize_domain()`
pub use candidates::primary_candidate_url;
pub use error::FetchError;
pub use fetch::Fetcher;
pub use normalize::normalize_domain;
pub use records::summarize_records;
pub use result::{CheckResult, CheckStatus, FetchOutcome};
