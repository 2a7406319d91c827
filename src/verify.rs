//! Remote URL verification.
//!
//! After a rewrite pass, a sample of the constructed URLs is probed with
//! plain HTTPS GETs to confirm the remote host actually serves them. The
//! fixed sample fans out over a rayon parallel iterator; every probe is
//! attempted exactly once — no retries, no backoff, no cancellation.
//!
//! A probe either completes with an HTTP status or fails in transport;
//! both are recorded uniformly as a [`ProbeResult`] (transport failures get
//! `status: 0` plus the error message). Only HTTP 200 counts as reachable.
//! Verification never fails the batch — the summary is informational.

use crate::manifest::Manifest;
use rayon::prelude::*;
use std::fmt;

/// Outcome of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    /// HTTP status code, or 0 for a transport error.
    pub status: u16,
    /// Transport error message when `status` is 0.
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Aggregated pass/fail counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifySummary {
    pub ok: usize,
    pub failed: usize,
}

impl fmt::Display for VerifySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} reachable, {} failed", self.ok, self.failed)
    }
}

/// Collect up to `limit` remote URLs across manifests, in manifest order.
pub fn sample_urls(manifests: &[Manifest], limit: usize) -> Vec<String> {
    manifests
        .iter()
        .flat_map(|m| m.images())
        .filter(|e| e.path.is_remote())
        .map(|e| e.path.as_str().to_string())
        .take(limit)
        .collect()
}

/// Probe every URL in parallel. Malformed URLs are reported as transport
/// failures without touching the network.
pub fn probe(urls: &[String]) -> Vec<ProbeResult> {
    let client = reqwest::blocking::Client::new();
    urls.par_iter()
        .map(|raw| {
            let parsed = match url::Url::parse(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    return ProbeResult {
                        url: raw.clone(),
                        status: 0,
                        error: Some(format!("invalid URL: {e}")),
                    };
                }
            };
            match client.get(parsed).send() {
                Ok(response) => ProbeResult {
                    url: raw.clone(),
                    status: response.status().as_u16(),
                    error: None,
                },
                Err(e) => ProbeResult {
                    url: raw.clone(),
                    status: 0,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}

/// Fold probe results into pass/fail counts.
pub fn summarize(results: &[ProbeResult]) -> VerifySummary {
    let ok = results.iter().filter(|r| r.is_ok()).count();
    VerifySummary {
        ok,
        failed: results.len() - ok,
    }
}
