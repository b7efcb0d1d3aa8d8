//! Client for the Porkbun v3 JSON API.
//!
//! The updater only needs four of the API's endpoints: `ping` (which reports
//! the caller's public IP), record retrieval, record creation and record edit.
//! They are captured in the [`PorkbunApi`] trait so the reconciliation logic in
//! [`crate::sync`] can be tested against a mock; [`PorkbunClient`] is the real
//! HTTP implementation.
//!
//! Every endpoint is an HTTPS POST of a JSON body and answers with a JSON
//! object carrying a `status` field. `"SUCCESS"` means the payload fields are
//! usable; anything else is a provider-reported failure whose `message` field
//! is surfaced in [`ApiError::Rejected`].

mod client;

pub use client::PorkbunClient;

use std::fmt::{self, Display};
use std::net::Ipv4Addr;

#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use thiserror::Error;

/// Production root of the Porkbun v3 API.
pub const API_BASE_URL: &str = "https://api.porkbun.com/api/json/v3";

/// The record type this tool manages. IPv6 (AAAA) is out of scope.
pub const RECORD_TYPE: &str = "A";

/// The four Porkbun operations the updater performs.
///
/// One call each per run, at most: `ping` and `retrieve` always, then either
/// `create` or `edit` (or neither). Each method issues a single attempt; there
/// is no retry.
#[cfg_attr(test, automock)]
pub trait PorkbunApi {
    /// Call `/ping` and return the `yourIp` field: the public address the
    /// provider saw this request come from. Returned verbatim; callers decide
    /// whether it is a usable IPv4 address.
    fn ping(&self) -> Result<String, ApiError>;

    /// Fetch all A records for `domain` (or `subdomain.domain`).
    fn retrieve_records(
        &self,
        domain: String,
        subdomain: Option<String>,
    ) -> Result<Vec<DnsRecord>, ApiError>;

    /// Create an A record. `name` is the bare subdomain, empty for the root.
    fn create_record(
        &self,
        domain: String,
        name: String,
        content: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ApiError>;

    /// Rewrite the A record for `domain`/`subdomain` in place. Name and type
    /// travel in the URL, so the body only carries the new content and TTL.
    fn edit_record(
        &self,
        domain: String,
        subdomain: Option<String>,
        content: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ApiError>;
}

/// A single DNS record as returned by the retrieve endpoint.
///
/// Porkbun sends more fields (id, name, type, ttl, ...); only the record value
/// matters here, the rest is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct DnsRecord {
    /// The record value. For A records this is the IPv4 address as a string.
    pub content: String,
}

/// Which API call an error came from; prefixes every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    Retrieve,
    Create,
    Edit,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Ping => "ping",
            Operation::Retrieve => "record retrieve",
            Operation::Create => "record create",
            Operation::Edit => "record edit",
        })
    }
}

/// Failure of a single API call. Always fatal to the run; the workflow never
/// retries or falls back.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS failure,
    /// TLS error, timeout).
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not JSON at all.
    #[error("{operation} returned a response that is not JSON: {source}")]
    Json {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// The provider answered with a non-`SUCCESS` status; `message` is its own
    /// explanation, passed through verbatim.
    #[error("{operation} failed: {message}")]
    Rejected { operation: Operation, message: String },
    /// Status was `SUCCESS` but the payload is missing an expected field.
    #[error("{operation} returned an unexpected response shape: {source}")]
    Shape {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The operation the failed call belonged to.
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Json { operation, .. }
            | ApiError::Rejected { operation, .. }
            | ApiError::Shape { operation, .. } => *operation,
        }
    }
}
