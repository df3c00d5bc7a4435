// src/checker/error.rs
// =============================================================================
// Why a single candidate URL didn't give us a usable app-ads.txt file.
//
// None of these ever reach the user directly. The fetcher uses them to decide
// what to do next (retry with relaxed TLS, or move on to the next URL) and
// writes them to the debug log.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    /// Certificate or handshake problem
    #[error("TLS error: {0}")]
    Tls(String),

    /// DNS, refused connection, too many redirects, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// Anything other than 200 OK
    #[error("HTTP {0}")]
    Status(u16),

    /// 200 OK, but the body is an HTML page
    #[error("got an HTML page instead of app-ads.txt")]
    SoftNotFound,

    #[error("could not read response body: {0}")]
    Body(String),

    #[error("could not build HTTP client: {0}")]
    ClientBuild(String),
}
