// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{
    CandidateOrder, CheckerConfig, HeaderProfile, DEFAULT_CONCURRENCY, DEFAULT_MAX_REDIRECTS,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::export::DEFAULT_CSV_NAME;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "app-ads-checker",
    version = "0.1.0",
    about = "Checks domains for a valid app-ads.txt file",
    long_about = "app-ads-checker looks for app-ads.txt on each domain (https and http, with and \
                  without www.), counts the valid DIRECT/RESELLER records, and reports the result \
                  per domain in input order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a list of domains for app-ads.txt
    ///
    /// Example: app-ads-checker check hyperhippo.com google.com --csv report.csv
    Check(CheckArgs),

    /// Count the valid records in local app-ads.txt files
    ///
    /// Exits 0 when every file has at least one valid record, 1 when any file
    /// has none, and 2 when a file can't be read.
    ///
    /// Example: app-ads-checker count ./public/app-ads.txt
    Count {
        /// Files to read
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Show debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Domains or URLs to check (one per argument)
    pub domains: Vec<String>,

    /// Read domains from a file, one per line ("-" for stdin)
    ///
    /// If neither domains nor --file are given, stdin is read.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also write the report as CSV (default file: app_ads_check_results.csv)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_CSV_NAME)]
    pub csv: Option<PathBuf>,

    /// How many domains to check at the same time
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Whether bare or www. URLs are tried first
    #[arg(long, value_enum, default_value_t = CandidateOrder::BareFirst)]
    pub order: CandidateOrder,

    /// User-Agent header to send
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Builds the checker settings from the flags
    pub fn to_config(&self) -> CheckerConfig {
        CheckerConfig {
            concurrency: self.concurrency,
            timeout: Duration::from_secs(self.timeout),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            order: self.order,
            headers: HeaderProfile::with_user_agent(self.user_agent.clone()),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is Check a tuple variant holding CheckArgs?
//    - It has many flags, and main.rs wants to pass them around as one value
//    - #[derive(clap::Args)] lets a plain struct describe a group of flags
//
// 2. What does value_enum do?
//    - It lets clap parse "bare-first" / "www-first" straight into the
//      CandidateOrder enum, and lists the choices in --help
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::parse_from(["app-ads-checker", "check", "example.com"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };

        assert_eq!(args.domains, vec!["example.com"]);
        let config = args.to_config();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.order, CandidateOrder::BareFirst);
        assert_eq!(config.headers, HeaderProfile::default());
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::parse_from([
            "app-ads-checker",
            "check",
            "--file",
            "domains.txt",
            "--order",
            "www-first",
            "--concurrency",
            "20",
            "--timeout",
            "10",
            "--csv",
            "out.csv",
            "--json",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };

        assert!(args.domains.is_empty());
        assert_eq!(args.file, Some(PathBuf::from("domains.txt")));
        assert_eq!(args.csv, Some(PathBuf::from("out.csv")));
        assert!(args.json);

        let config = args.to_config();
        assert_eq!(config.order, CandidateOrder::WwwFirst);
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_csv_flag_without_path_uses_default_name() {
        let cli = Cli::parse_from(["app-ads-checker", "check", "a.com", "--csv"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.domains, vec!["a.com"]);
        assert_eq!(args.csv, Some(PathBuf::from(DEFAULT_CSV_NAME)));
    }

    #[test]
    fn test_count_help_documents_exit_codes() {
        use clap::CommandFactory;

        let mut command = Cli::command();
        let count = command
            .find_subcommand_mut("count")
            .expect("count subcommand");
        let help = count.render_long_help().to_string();
        assert!(help.contains("1 when any file"));
        assert!(help.contains("has none"));
    }

    #[test]
    fn test_count_requires_files() {
        assert!(Cli::try_parse_from(["app-ads-checker", "count"]).is_err());
    }
}
