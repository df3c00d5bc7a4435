// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// Logs go to stderr so that `--json` output on stdout stays machine-readable.
// RUST_LOG wins if it is set; otherwise we show warnings, or debug output
// for this crate when --verbose is passed.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,app_ads_checker=debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so a second call (or a test harness) doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
