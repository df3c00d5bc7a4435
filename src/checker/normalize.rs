// src/checker/normalize.rs
// =============================================================================
// This module turns whatever the user typed into a bare host name.
//
// People paste all sorts of things into a domain list:
//   "example.com"
//   https://www.example.com/some/page
//   'Example.COM'
// We want the same answer for all of them: "example.com".
//
// Steps:
// 1. Trim whitespace and quote characters from both ends
// 2. If there is no http:// or https:// in front, pretend there is one
//    (this is only so the url crate can parse it, nothing is fetched here)
// 3. Take the host (and port, if one was given) and lower-case it
// 4. Drop a single leading "www." so the fetcher can try both forms itself
//
// If the input can't be parsed as a URL at all we just hand back the
// trimmed text. Normalizing never fails.
// =============================================================================

use url::Url;

// Normalizes one input line into a host string
//
// Example:
//   normalize_domain("  \"https://WWW.Example.com/app-ads.txt\" ")
//   -> "example.com"
pub fn normalize_domain(input: &str) -> String {
    let cleaned = strip_wrapping(input);

    if cleaned.is_empty() {
        return String::new();
    }

    let with_scheme = if has_http_scheme(cleaned) {
        cleaned.to_string()
    } else {
        format!("http://{}", cleaned)
    };

    let parsed = match Url::parse(&with_scheme) {
        Ok(url) => url,
        Err(_) => return cleaned.to_string(),
    };

    match host_of(&parsed) {
        Some(host) => strip_www(&host.to_lowercase()).to_string(),
        None => cleaned.to_string(),
    }
}

// Removes whitespace and quote characters from both ends
fn strip_wrapping(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// The authority part of the URL, or the first path segment when there is
// no usable authority
fn host_of(url: &Url) -> Option<String> {
    if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
        return Some(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        });
    }

    url.path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn strip_www(host: &str) -> &str {
    match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest,
        _ => host,
    }
}
