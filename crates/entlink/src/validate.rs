//! Link existence validation against the external reference service.
//!
//! The check itself is a boundary collaborator: a blocking HTTP round trip
//! that gates whether a record is ever created. The trait seam keeps the
//! core testable without a network.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::Result;

/// Decides whether a normalized link may be stored.
///
/// The empty-link sentinel is always valid; implementations only judge
/// non-empty links.
pub trait LinkValidator {
    /// True when the link may be stored.
    fn validate(&self, link: &str) -> Result<bool>;
}

/// Validates links with a GET against the reference service.
///
/// A link is valid iff the request answers 200. There is no timeout by
/// default; [`with_timeout`](Self::with_timeout) bounds the round trip, and
/// a timed-out request surfaces as an HTTP error rather than a silent
/// rejection.
#[derive(Debug)]
pub struct HttpValidator {
    client: reqwest::blocking::Client,
}

impl HttpValidator {
    /// Create a validator with no request timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Create a validator that gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl LinkValidator for HttpValidator {
    fn validate(&self, link: &str) -> Result<bool> {
        if link.is_empty() {
            return Ok(true);
        }
        let response = self.client.get(link).send()?;
        Ok(response.status() == reqwest::StatusCode::OK)
    }
}

/// Accepts every link without a network call (offline mode).
#[derive(Debug, Default)]
pub struct AcceptAllValidator;

impl LinkValidator for AcceptAllValidator {
    fn validate(&self, _link: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Validates against a fixed allow-list; for tests.
#[derive(Debug, Default)]
pub struct MockValidator {
    known: HashSet<String>,
}

impl MockValidator {
    /// Create a validator that rejects every non-empty link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link to the allow-list.
    pub fn with_known(mut self, link: impl Into<String>) -> Self {
        self.known.insert(link.into());
        self
    }
}

impl LinkValidator for MockValidator {
    fn validate(&self, link: &str) -> Result<bool> {
        Ok(link.is_empty() || self.known.contains(link))
    }
}
