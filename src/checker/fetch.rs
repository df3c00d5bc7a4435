// src/checker/fetch.rs
// =============================================================================
// This module finds and downloads the app-ads.txt file for one host.
//
// Key functionality:
// - Tries each candidate URL in order (https before http, bare/www per config)
// - Sends browser-like headers, because some hosts block obvious bots
// - Retries once with certificate checks turned off if TLS fails
// - Rejects "soft 404s": a 200 OK whose body is really an HTML page
// - Never returns an error: the worst case is an Error / Not Found outcome
//
// Every attempt ends in an Attempt value, and next_step() decides what to do
// with it. That keeps the retry rules in one small function instead of being
// spread through the loop.
//
// Rust concepts:
// - async/await: For network I/O
// - Enums as state: Attempt and Step describe where we are in the loop
// - Clone: reqwest::Client is cheap to clone (shared connection pool)
// =============================================================================

use std::error::Error as _;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::candidates::{candidate_urls, primary_candidate_url};
use super::error::FetchError;
use super::records::count_valid_records;
use super::result::FetchOutcome;
use crate::config::{CandidateOrder, CheckerConfig, HTML_SNIFF_CHARS};

// How one request for one candidate URL turned out
#[derive(Debug)]
enum Attempt {
    /// Plain-text body we can hand to the record parser
    Accepted(String),
    /// The server answered, but not with a usable file (non-200, HTML page)
    SoftFailure(FetchError),
    /// Certificate or handshake problem on an https URL
    TlsFailure(FetchError),
    /// Timeout, DNS failure, refused connection, unreadable body
    HardFailure(FetchError),
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Accepted(body) => write!(f, "accepted ({} bytes)", body.len()),
            Attempt::SoftFailure(e) => write!(f, "soft failure: {}", e),
            Attempt::TlsFailure(e) => write!(f, "tls failure: {}", e),
            Attempt::HardFailure(e) => write!(f, "hard failure: {}", e),
        }
    }
}

// What the candidate loop does after an attempt
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Accept(String),
    RetryRelaxed,
    NextCandidate,
}

// The whole retry policy
//
// Only a TLS failure earns a second try, and only once per candidate.
fn next_step(attempt: Attempt, already_relaxed: bool) -> Step {
    match attempt {
        Attempt::Accepted(body) => Step::Accept(body),
        Attempt::TlsFailure(_) if !already_relaxed => Step::RetryRelaxed,
        Attempt::TlsFailure(_) | Attempt::SoftFailure(_) | Attempt::HardFailure(_) => {
            Step::NextCandidate
        }
    }
}

/// Fetches app-ads.txt files using one shared pair of HTTP clients
///
/// `strict` verifies certificates normally. `relaxed` accepts invalid
/// certificates and is only used for the single retry after a TLS failure.
#[derive(Debug, Clone)]
pub struct Fetcher {
    strict: Client,
    relaxed: Client,
    order: CandidateOrder,
}

impl Fetcher {
    // Builds both clients from the config
    //
    // Fails only if the header profile contains something that isn't a valid
    // header value, or the TLS backend can't start.
    pub fn new(config: &CheckerConfig) -> Result<Self, FetchError> {
        Ok(Fetcher {
            strict: build_client(config, false)?,
            relaxed: build_client(config, true)?,
            order: config.order,
        })
    }

    // Checks one normalized host and returns (url, status, record count)
    //
    // The first candidate that gives us a plain-text 200 wins. If none do,
    // the first candidate URL is reported with an Error status.
    pub async fn check_host(&self, host: &str) -> FetchOutcome {
        for url in candidate_urls(host, self.order) {
            if let Some(body) = self.try_candidate(&url).await {
                let valid_records = count_valid_records(&body);
                debug!(%url, valid_records, "app-ads.txt found");
                return FetchOutcome::found(url, valid_records);
            }
        }

        debug!(host, "no candidate produced an app-ads.txt file");
        FetchOutcome::not_found(primary_candidate_url(host, self.order))
    }

    // Runs the attempt / retry loop for a single URL
    async fn try_candidate(&self, url: &str) -> Option<String> {
        let mut relaxed = false;

        loop {
            let client = if relaxed { &self.relaxed } else { &self.strict };
            let attempt = send_attempt(client, url).await;
            debug!(url, relaxed, outcome = %attempt, "attempt finished");

            match next_step(attempt, relaxed) {
                Step::Accept(body) => return Some(body),
                Step::RetryRelaxed => {
                    debug!(url, "retrying with certificate validation disabled");
                    relaxed = true;
                }
                Step::NextCandidate => return None,
            }
        }
    }
}

fn build_client(config: &CheckerConfig, relaxed: bool) -> Result<Client, FetchError> {
    let profile = &config.headers;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value(&profile.accept)?);
    headers.insert(ACCEPT_LANGUAGE, header_value(&profile.accept_language)?);

    // Validated here so a bad value surfaces as ClientBuild with context
    header_value(&profile.user_agent)?;

    let mut builder = Client::builder()
        .user_agent(profile.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

    if relaxed {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| FetchError::ClientBuild(e.to_string()))
}

fn header_value(value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value)
        .map_err(|e| FetchError::ClientBuild(format!("invalid header value {:?}: {}", value, e)))
}

// One GET request, classified
async fn send_attempt(client: &Client, url: &str) -> Attempt {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(url, e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return Attempt::SoftFailure(FetchError::Status(status.as_u16()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) if e.is_timeout() => return Attempt::HardFailure(FetchError::Timeout),
        Err(e) => return Attempt::HardFailure(FetchError::Body(error_chain(&e))),
    };

    if looks_like_html(&body) {
        return Attempt::SoftFailure(FetchError::SoftNotFound);
    }

    Attempt::Accepted(body)
}

// Sorts a reqwest error into "worth a relaxed retry" or not
//
// reqwest doesn't expose certificate errors as their own kind, so we look
// through the error's causes for TLS wording. The top-level message is
// skipped: it contains the URL, and a host name like "ssl-shop.com" must
// not turn a DNS failure into a TLS retry.
fn classify_error(url: &str, error: reqwest::Error) -> Attempt {
    if error.is_timeout() {
        return Attempt::HardFailure(FetchError::Timeout);
    }

    let causes = error
        .source()
        .map(|cause| error_chain(cause))
        .unwrap_or_default();
    let detail = error_chain(&error);

    if url.starts_with("https://") && mentions_tls(&causes) {
        Attempt::TlsFailure(FetchError::Tls(detail))
    } else {
        Attempt::HardFailure(FetchError::Transport(detail))
    }
}

// "error sending request for url (...): error trying to connect: invalid peer certificate"
//
// hyper already prints its own cause in its message, so a cause whose text
// is already in the message is skipped.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

fn mentions_tls(detail: &str) -> bool {
    const TLS_MARKERS: [&str; 6] = [
        "certificate",
        "tls",
        "ssl",
        "handshake",
        "unknownissuer",
        "notvalidforname",
    ];

    let lower = detail.to_lowercase();
    TLS_MARKERS.iter().any(|marker| lower.contains(marker))
}

// A 200 whose first few hundred characters look like an HTML document
fn looks_like_html(body: &str) -> bool {
    let head: String = body.chars().take(HTML_SNIFF_CHARS).collect();
    let head = head.to_lowercase();
    head.contains("<html") || head.contains("<!doctype")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two clients?
//    - reqwest decides whether to check certificates when the client is built
//    - We can't switch it per request, so we build one of each up front
//    - Both share the same timeout, redirect and header settings
//
// 2. What is `if let Some(body) = ...`?
//    - Runs the block only when the Option holds a value
//    - try_candidate returns None when the URL should be skipped
//
// 3. Why chars().take() and not &body[..300]?
//    - Slicing a String by bytes panics if it lands inside a multi-byte
//      character (é, emoji, ...)
//    - chars() always walks whole characters
//
// 4. What does `outcome = %attempt` mean in debug!?
//    - It records the field using its Display implementation
//    - tracing fields are structured, so log tools can filter on them
// -----------------------------------------------------------------------------
