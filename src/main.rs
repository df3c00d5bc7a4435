// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Collect results and print them (table or JSON, plus optional CSV)
// 4. Exit with proper code (0 = every file found, 1 = some missing, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod batch; // src/batch/ - runs the checker over a whole list
mod checker; // src/checker/ - checking a single domain
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - batch and fetch settings
mod export; // src/export.rs - CSV report
mod input; // src/input.rs - reading the domain list
mod logging; // src/logging.rs - tracing setup

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use serde::Serialize;

use checker::{CheckResult, CheckStatus};
use cli::{CheckArgs, Cli, Commands};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a multi-threaded tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every domain has an app-ads.txt file
//   Ok(1) = at least one domain has none
//   Err = bad arguments, unreadable input, unwritable CSV
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            logging::init_logging(args.verbose);
            handle_check(&args).await
        }
        Commands::Count {
            files,
            json,
            verbose,
        } => {
            logging::init_logging(verbose);
            handle_count(&files, json)
        }
    }
}

// Handles the 'check' subcommand
async fn handle_check(args: &CheckArgs) -> Result<i32> {
    let config = args.to_config();
    config.validate().context("Invalid settings")?;

    let lines = input::collect_lines(&args.domains, args.file.as_deref())?;
    let domain_count = lines.iter().filter(|l| !l.trim().is_empty()).count();

    if domain_count == 0 {
        eprintln!("⚠️  The domain list is empty");
        return Ok(0);
    }

    eprintln!("🔍 Analyzing {} domain(s)...", domain_count);

    // Progress goes to stderr and rewrites the same line
    let progress: batch::ProgressCallback = Some(Arc::new(|done, total| {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r   Processed: {}/{}", done, total);
        let _ = stderr.flush();
    }));

    let results = batch::run_batch(&lines, &config, progress)
        .await
        .context("Failed to start the check")?;
    eprintln!();

    print_results(&results, args.json)?;

    if let Some(path) = &args.csv {
        let rows = export::write_csv_file(&results, path)?;
        eprintln!("💾 Wrote {} row(s) to {}", rows, path.display());
    }

    let missing = results.iter().filter(|r| !r.is_ok()).count();
    if missing > 0 {
        Ok(1) // Exit code 1 = some domains have no usable file
    } else {
        Ok(0)
    }
}

// One line of `count` output
#[derive(Debug, Serialize)]
struct FileCount {
    file: PathBuf,
    valid_records: usize,
    other_lines: usize,
}

// Handles the 'count' subcommand
//
// Same parser as the network check, pointed at local files.
fn handle_count(files: &[PathBuf], json: bool) -> Result<i32> {
    let mut counts = Vec::with_capacity(files.len());

    for file in files {
        let bytes =
            std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
        let summary = checker::summarize_records(&String::from_utf8_lossy(&bytes));
        counts.push(FileCount {
            file: file.clone(),
            valid_records: summary.valid_records,
            other_lines: summary.other_lines,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("{:<50} {:>13} {:>12}", "FILE", "VALID RECORDS", "OTHER LINES");
        println!("{}", "=".repeat(77));
        for count in &counts {
            println!(
                "{:<50} {:>13} {:>12}",
                truncate(&count.file.display().to_string(), 50),
                count.valid_records,
                count.other_lines
            );
        }
    }

    // A file with nothing valid in it would be reported as "Valid (Empty)"
    if counts.iter().any(|c| c.valid_records == 0) {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the results either as a table or JSON
fn print_results(results: &[CheckResult], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(results)?;
        println!("{}", json_output);
    } else {
        print_table(results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &[CheckResult]) {
    println!("{:<60} {:<22} {:>11}", "APP-ADS LINK", "STATUS", "VALID LINES");
    println!("{}", "=".repeat(95));

    for result in results {
        println!(
            "{:<60} {:<22} {:>11}",
            truncate(&result.resolved_url, 60),
            format_status(result.status),
            result.valid_records
        );
    }

    println!();

    let valid = count_status(results, CheckStatus::Valid);
    let empty = count_status(results, CheckStatus::ValidEmpty);
    let errors = count_status(results, CheckStatus::Error);

    println!("📊 Summary:");
    println!("   ✅ Valid: {}", valid);
    println!("   📭 Valid (Empty): {}", empty);
    println!("   ❌ Error / Not Found: {}", errors);
    println!("   📋 Total: {}", results.len());
}

fn count_status(results: &[CheckResult], status: CheckStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}

fn format_status(status: CheckStatus) -> String {
    match status {
        CheckStatus::Valid => format!("✅ {}", status.label()),
        CheckStatus::ValidEmpty => format!("📭 {}", status.label()),
        CheckStatus::Error => format!("❌ {}", status.label()),
    }
}

// Shortens long text for the table, keeping whole characters
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
