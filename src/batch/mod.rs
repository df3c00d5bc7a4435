// src/batch/mod.rs
// =============================================================================
// This module runs the checker over a whole list of domains.
//
// Features:
// - Skips blank lines and remembers each domain's position in the input
// - Checks many domains at once, with a fixed upper limit
// - Reports progress as each domain finishes
// - Puts the results back in input order at the end
// - Always returns one result per domain, even if a check crashes
// =============================================================================

mod coordinator;

pub use coordinator::{prepare_tasks, run_batch, ProgressCallback};
