// src/config.rs
// =============================================================================
// This file holds the settings that control how a batch is checked.
//
// Everything that is a policy choice rather than a correctness rule lives
// here: how many domains we check at once, how long one request may take,
// which candidate URL we try first, and which browser we pretend to be.
//
// The CLI builds a CheckerConfig from its flags; tests build one directly.
//
// Rust concepts:
// - Default trait: A standard way to say "the normal settings"
// - Enums with clap::ValueEnum: Let a CLI flag pick one of several variants
// - thiserror: Derive a proper error type with a readable message
// =============================================================================

use std::time::Duration;

use clap::ValueEnum;
use thiserror::Error;

/// Path every candidate URL points at
pub const APP_ADS_PATH: &str = "/app-ads.txt";

/// How many domains are checked at the same time
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Redirect hops followed before giving up on a candidate
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// How much of a 200 body we look at when deciding if it is really an HTML page
pub const HTML_SNIFF_CHARS: usize = 300;

/// Desktop Chrome on Windows. Some ad-tech hosts sit behind bot filters that
/// reject anything that doesn't look like a browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.7";

const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

// Which subdomain form is tried first for each scheme
//
// Some publishers only serve the file on www.example.com, others only on
// example.com. Both are always tried; this just picks the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CandidateOrder {
    /// example.com before www.example.com
    #[default]
    BareFirst,
    /// www.example.com before example.com
    WwwFirst,
}

/// The request headers sent with every attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProfile {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl HeaderProfile {
    /// The default browser profile with a different User-Agent
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        HeaderProfile {
            user_agent: user_agent.into(),
            ..HeaderProfile::default()
        }
    }
}

impl Default for HeaderProfile {
    fn default() -> Self {
        HeaderProfile {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

// All the knobs for one batch run
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Number of domains checked concurrently
    pub concurrency: usize,
    /// Timeout for a single HTTP attempt
    pub timeout: Duration,
    /// Maximum redirects followed per attempt
    pub max_redirects: usize,
    /// Bare-vs-www ordering of candidates
    pub order: CandidateOrder,
    /// Headers presented to the target servers
    pub headers: HeaderProfile,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            order: CandidateOrder::default(),
            headers: HeaderProfile::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("user agent must not be empty")]
    EmptyUserAgent,
}

impl CheckerConfig {
    // Rejects settings that would make a batch hang or never start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.headers.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CheckerConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.order, CandidateOrder::BareFirst);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CheckerConfig {
            concurrency: 0,
            ..CheckerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CheckerConfig {
            timeout: Duration::ZERO,
            ..CheckerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_custom_user_agent_keeps_other_headers() {
        let profile = HeaderProfile::with_user_agent("my-bot/1.0");
        assert_eq!(profile.user_agent, "my-bot/1.0");
        assert_eq!(profile.accept, HeaderProfile::default().accept);

        let config = CheckerConfig {
            headers: HeaderProfile::with_user_agent("   "),
            ..CheckerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyUserAgent));
    }
}
