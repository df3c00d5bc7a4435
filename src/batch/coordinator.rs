// src/batch/coordinator.rs
// =============================================================================
// This module fans a list of domains out to the fetcher and collects the
// results back in the order the user gave them.
//
// How it works:
// 1. Drop blank lines, number the rest 0, 1, 2, ... and normalize each one
// 2. Spawn one tokio task per domain, but never more than `concurrency` at once
// 3. As each task finishes (in whatever order), turn it into a CheckResult
//    and bump the progress counter
// 4. When everything is done, sort by the original number
//
// If a task panics, tokio hands us a JoinError instead of a result. We turn
// that into an Error row for the same domain, so nothing goes missing.
//
// Rust concepts:
// - Generics with Fn bounds: The fetch step is passed in as a closure,
//   which lets the tests swap in a fake fetcher
// - tokio::spawn: Runs each check on the multi-threaded runtime
// - Arc<dyn Fn>: A shared, thread-safe callback
// =============================================================================

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use tracing::{info, warn};

use crate::checker::{
    normalize_domain, primary_candidate_url, CheckResult, CheckStatus, FetchError, FetchOutcome,
    Fetcher,
};
use crate::config::{CandidateOrder, CheckerConfig};

/// Called with (completed, total) after every finished domain
pub type ProgressCallback = Option<Arc<dyn Fn(usize, usize) + Send + Sync>>;

// One domain waiting to be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTask {
    pub original_index: usize,
    pub raw_input: String,
    pub normalized_host: String,
}

impl DomainTask {
    fn into_result(self, outcome: FetchOutcome) -> CheckResult {
        CheckResult {
            original_index: self.original_index,
            input: self.raw_input,
            host: self.normalized_host,
            resolved_url: outcome.resolved_url,
            status: outcome.status,
            valid_records: outcome.valid_records,
        }
    }
}

// Turns raw input lines into numbered tasks
//
// Blank (or whitespace-only) lines are dropped before numbering, so
// original_index counts domains, not lines.
pub fn prepare_tasks<I, S>(lines: I) -> Vec<DomainTask>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let trimmed = line.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .enumerate()
        .map(|(original_index, raw_input)| DomainTask {
            original_index,
            normalized_host: normalize_domain(&raw_input),
            raw_input,
        })
        .collect()
}

// Checks every domain in `lines` and returns the report in input order
//
// The only error is failing to build the HTTP clients; once the batch has
// started, every domain gets a row.
pub async fn run_batch<S: AsRef<str>>(
    lines: &[S],
    config: &CheckerConfig,
    progress: ProgressCallback,
) -> Result<Vec<CheckResult>, FetchError> {
    let fetcher = Fetcher::new(config)?;
    let tasks = prepare_tasks(lines);

    info!(
        domains = tasks.len(),
        concurrency = config.concurrency,
        "starting app-ads.txt check"
    );

    let results = run_tasks(tasks, config.concurrency, config.order, progress, move |host| {
        let fetcher = fetcher.clone();
        async move { fetcher.check_host(&host).await }
    })
    .await;

    let errors = results
        .iter()
        .filter(|r| r.status == CheckStatus::Error)
        .count();
    info!(domains = results.len(), errors, "app-ads.txt check finished");

    Ok(results)
}

// The fan-out / fan-in itself, independent of how a host is fetched
async fn run_tasks<F, Fut>(
    tasks: Vec<DomainTask>,
    concurrency: usize,
    order: CandidateOrder,
    progress: ProgressCallback,
    fetch: F,
) -> Vec<CheckResult>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FetchOutcome> + Send + 'static,
{
    let total = tasks.len();
    let fetch = Arc::new(fetch);

    // Each future spawns its task only when buffer_unordered first polls it,
    // so at most `concurrency` checks are running at any moment
    let futures = tasks.into_iter().map(|task| {
        let fetch = Arc::clone(&fetch);
        async move {
            let joined = tokio::spawn(fetch(task.normalized_host.clone())).await;
            (task, joined)
        }
    });

    let mut in_flight = stream::iter(futures).buffer_unordered(concurrency.max(1));

    let mut results = Vec::with_capacity(total);
    let mut completed = 0;

    while let Some((task, joined)) = in_flight.next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    index = task.original_index,
                    host = %task.normalized_host,
                    error = %e,
                    "check task failed; reporting as not found"
                );
                FetchOutcome::not_found(primary_candidate_url(&task.normalized_host, order))
            }
        };

        results.push(task.into_result(outcome));

        completed += 1;
        if let Some(callback) = &progress {
            callback(completed, total);
        }
    }

    // Completion order is arbitrary; input order is what the user sees
    results.sort_by_key(|r| r.original_index);
    results
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why collect first and sort later?
//    - Tasks finish in whatever order the network decides
//    - Keeping a sorted list while results arrive would need locking
//    - Sorting once at the end is simple and can't get it wrong
//
// 2. What does tokio::spawn give us?
//    - The check runs on any worker thread of the runtime (real parallelism)
//    - If the check panics, the panic stays inside that task
//    - We get a JoinError back instead of the whole program crashing
//
// 3. What is `.then(|| ...)` on a bool?
//    - true.then(|| x) is Some(x), false.then(|| x) is None
//    - Handy inside filter_map
// -----------------------------------------------------------------------------
