// src/checker/candidates.rs
// =============================================================================
// This module builds the list of URLs we try for one host.
//
// There's no single rule for where publishers put app-ads.txt. Some sites
// only answer on www., some only on the bare domain, and some never set up
// HTTPS. So for "example.com" we try (with the default ordering):
//   https://example.com/app-ads.txt
//   https://www.example.com/app-ads.txt
//   http://example.com/app-ads.txt
//   http://www.example.com/app-ads.txt
//
// HTTPS always comes first. Whether bare or www comes first within a scheme
// is a setting (CandidateOrder).
// =============================================================================

use std::net::IpAddr;

use crate::config::{CandidateOrder, APP_ADS_PATH};

const SCHEMES: [&str; 2] = ["https", "http"];

// Returns the ordered, de-duplicated candidate URLs for a host
pub fn candidate_urls(host: &str, order: CandidateOrder) -> Vec<String> {
    let forms = host_forms(host, order);

    let mut urls: Vec<String> = Vec::with_capacity(SCHEMES.len() * forms.len());
    for scheme in SCHEMES {
        for form in &forms {
            let url = format!("{}://{}{}", scheme, form, APP_ADS_PATH);
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }

    urls
}

// The first candidate. Shown in the report when nothing could be fetched.
pub fn primary_candidate_url(host: &str, order: CandidateOrder) -> String {
    candidate_urls(host, order)
        .into_iter()
        .next()
        .unwrap_or_else(|| format!("https://{}{}", host, APP_ADS_PATH))
}

// Bare and www forms of the host, in the requested order
fn host_forms(host: &str, order: CandidateOrder) -> Vec<String> {
    let bare = host.to_string();

    if !wants_www_variant(host) {
        return vec![bare];
    }

    let www = if host.starts_with("www.") {
        host.to_string()
    } else {
        format!("www.{}", host)
    };

    match order {
        CandidateOrder::BareFirst => vec![bare, www],
        CandidateOrder::WwwFirst => vec![www, bare],
    }
}

// "www." in front of an IP address or localhost is never a real host
fn wants_www_variant(host: &str) -> bool {
    let name = without_port(host);

    if name.is_empty() || name.starts_with('[') || name.eq_ignore_ascii_case("localhost") {
        return false;
    }

    name.parse::<IpAddr>().is_err()
}

fn without_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8080 -> [::1]
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_first_order() {
        let urls = candidate_urls("example.com", CandidateOrder::BareFirst);
        assert_eq!(
            urls,
            vec![
                "https://example.com/app-ads.txt",
                "https://www.example.com/app-ads.txt",
                "http://example.com/app-ads.txt",
                "http://www.example.com/app-ads.txt",
            ]
        );
    }

    #[test]
    fn test_www_first_order() {
        let urls = candidate_urls("example.com", CandidateOrder::WwwFirst);
        assert_eq!(urls[0], "https://www.example.com/app-ads.txt");
        assert_eq!(urls[1], "https://example.com/app-ads.txt");
        assert_eq!(urls[2], "http://www.example.com/app-ads.txt");
        assert_eq!(urls[3], "http://example.com/app-ads.txt");
    }

    #[test]
    fn test_host_already_starting_with_www_is_deduplicated() {
        let urls = candidate_urls("www.example.com", CandidateOrder::BareFirst);
        assert_eq!(
            urls,
            vec![
                "https://www.example.com/app-ads.txt",
                "http://www.example.com/app-ads.txt",
            ]
        );
    }

    #[test]
    fn test_ip_hosts_skip_www() {
        let urls = candidate_urls("127.0.0.1:8080", CandidateOrder::WwwFirst);
        assert_eq!(
            urls,
            vec![
                "https://127.0.0.1:8080/app-ads.txt",
                "http://127.0.0.1:8080/app-ads.txt",
            ]
        );
        assert_eq!(candidate_urls("localhost", CandidateOrder::BareFirst).len(), 2);
        assert_eq!(candidate_urls("[::1]:3000", CandidateOrder::BareFirst).len(), 2);
    }

    #[test]
    fn test_never_more_than_four_candidates() {
        for host in ["example.com", "a.b.example.co.uk", "example.com:8443"] {
            assert!(candidate_urls(host, CandidateOrder::BareFirst).len() <= 4);
        }
    }

    #[test]
    fn test_primary_candidate_follows_order() {
        assert_eq!(
            primary_candidate_url("example.com", CandidateOrder::BareFirst),
            "https://example.com/app-ads.txt"
        );
        assert_eq!(
            primary_candidate_url("example.com", CandidateOrder::WwwFirst),
            "https://www.example.com/app-ads.txt"
        );
    }
}
