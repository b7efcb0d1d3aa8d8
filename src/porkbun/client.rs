use std::net::Ipv4Addr;

use log::{debug, trace};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, DnsRecord, Operation, PorkbunApi, API_BASE_URL, RECORD_TYPE};
use crate::credentials::Credentials;

const STATUS_SUCCESS: &str = "SUCCESS";

/// Blocking HTTP implementation of [`PorkbunApi`].
///
/// Holds the credentials and a connection pool; it is otherwise stateless, each
/// call is an independent POST. No timeout is configured beyond the transport
/// default, and a failed call is never retried.
pub struct PorkbunClient {
    http: reqwest::blocking::Client,
    base_url: String,
    credentials: Credentials,
}

impl PorkbunClient {
    /// Client against the production API ([`API_BASE_URL`]).
    pub fn new(credentials: Credentials) -> PorkbunClient {
        PorkbunClient::with_base_url(credentials, API_BASE_URL)
    }

    /// Client against an alternate API root, e.g. a local test server.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> PorkbunClient {
        PorkbunClient {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    // POST the body to base_url + path, check the status field, then hand the
    // full reply to serde for payload extraction. Bodies are never logged, they
    // carry the key pair.
    fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport { operation, source })?;
        let reply: Value = response
            .json()
            .map_err(|source| ApiError::Json { operation, source })?;

        let status = reply
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if status != STATUS_SUCCESS {
            let message = reply
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("provider returned status {:?}", status));
            return Err(ApiError::Rejected { operation, message });
        }
        trace!("{} succeeded", operation);

        serde_json::from_value(reply).map_err(|source| ApiError::Shape { operation, source })
    }
}

// Path for the two endpoints that address a record by name and type. The
// subdomain segment is simply left out for records on the domain root.
fn name_type_path(verb: &str, domain: &str, subdomain: Option<&str>) -> String {
    match subdomain {
        Some(sub) => format!("/dns/{}/{}/{}/{}", verb, domain, RECORD_TYPE, sub),
        None => format!("/dns/{}/{}/{}", verb, domain, RECORD_TYPE),
    }
}

#[derive(Serialize)]
struct CreateRecordBody<'a> {
    #[serde(flatten)]
    credentials: &'a Credentials,
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    content: String,
    ttl: u32,
}

// Name and type travel in the URL for edits; resending them is rejected.
#[derive(Serialize)]
struct EditRecordBody<'a> {
    #[serde(flatten)]
    credentials: &'a Credentials,
    content: String,
    ttl: u32,
}

#[derive(Debug, Deserialize)]
struct PingResponse {
    #[serde(rename = "yourIp")]
    your_ip: String,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    #[serde(default)]
    records: Vec<DnsRecord>,
}

#[derive(Debug, Deserialize)]
struct Ack {}

impl PorkbunApi for PorkbunClient {
    fn ping(&self) -> Result<String, ApiError> {
        let response: PingResponse = self.call(Operation::Ping, "/ping", &self.credentials)?;
        Ok(response.your_ip)
    }

    fn retrieve_records(
        &self,
        domain: String,
        subdomain: Option<String>,
    ) -> Result<Vec<DnsRecord>, ApiError> {
        let path = name_type_path("retrieveByNameType", &domain, subdomain.as_deref());
        let response: RetrieveResponse =
            self.call(Operation::Retrieve, &path, &self.credentials)?;
        Ok(response.records)
    }

    fn create_record(
        &self,
        domain: String,
        name: String,
        content: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ApiError> {
        let body = CreateRecordBody {
            credentials: &self.credentials,
            record_type: RECORD_TYPE,
            name: &name,
            content: content.to_string(),
            ttl,
        };
        let path = format!("/dns/create/{}", domain);
        let _: Ack = self.call(Operation::Create, &path, &body)?;
        Ok(())
    }

    fn edit_record(
        &self,
        domain: String,
        subdomain: Option<String>,
        content: Ipv4Addr,
        ttl: u32,
    ) -> Result<(), ApiError> {
        let body = EditRecordBody {
            credentials: &self.credentials,
            content: content.to_string(),
            ttl,
        };
        let path = name_type_path("editByNameType", &domain, subdomain.as_deref());
        let _: Ack = self.call(Operation::Edit, &path, &body)?;
        Ok(())
    }
}
