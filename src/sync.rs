//! The reconciliation workflow.
//!
//! One run is three API calls at most: ask the provider for our public IP,
//! fetch the A record for the configured host, then create it, rewrite it or
//! leave it alone. [`synchronize`] performs the run against any [`PorkbunApi`]
//! and reports what happened as an [`Outcome`]; turning that into process exit
//! codes and stdout lines is the binary's job.

use std::net::Ipv4Addr;

use log::{debug, info};
use thiserror::Error;

use crate::{
    config::Config,
    porkbun::{ApiError, DnsRecord, PorkbunApi},
};

/// What a run did, or would have done in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No A record existed for the host; one now points at `ip`.
    Created { host: String, ip: Ipv4Addr },
    /// The record held `previous` and was rewritten to `current`.
    Updated {
        host: String,
        previous: String,
        current: Ipv4Addr,
    },
    /// The record already holds `ip`; nothing was written.
    Unchanged { host: String, ip: Ipv4Addr },
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// `ping` answered with something that is not an IPv4 address.
    #[error("ping did not return an IPv4 address: {0:?}")]
    MalformedIp(String),
}

// The decision, kept apart from its execution. Only the first record counts,
// and the comparison is exact string equality: a differently spelled but
// equivalent address still triggers a rewrite.
enum Action {
    Create,
    Update { previous: String },
    Keep,
}

fn plan(records: &[DnsRecord], detected: Ipv4Addr) -> Action {
    match records.first() {
        None => Action::Create,
        Some(existing) if existing.content == detected.to_string() => Action::Keep,
        Some(existing) => Action::Update {
            previous: existing.content.to_owned(),
        },
    }
}

/// Run the workflow once.
///
/// Exactly one of create/update/keep happens per run, decided solely by record
/// presence and content match. The first failed call aborts the run; nothing
/// that already happened is rolled back.
pub fn synchronize(api: &dyn PorkbunApi, config: &Config) -> Result<Outcome, SyncError> {
    let reported = api.ping()?;
    let detected: Ipv4Addr = match reported.parse() {
        Ok(addr) => addr,
        Err(_) => return Err(SyncError::MalformedIp(reported)),
    };
    info!("provider reports our public IPv4 address as {}", detected);

    let records = api.retrieve_records(config.domain.to_owned(), config.subdomain.to_owned())?;
    let host = config.host();
    debug!("{} existing A record(s) for {}", records.len(), host);

    match plan(&records, detected) {
        Action::Create => {
            if config.dry_run {
                info!("dry-run: not creating a record for {}", host);
            } else {
                let name = config.subdomain.to_owned().unwrap_or_default();
                api.create_record(config.domain.to_owned(), name, detected, config.ttl)?;
            }
            Ok(Outcome::Created { host, ip: detected })
        }
        Action::Keep => {
            debug!("record for {} already points at {}", host, detected);
            Ok(Outcome::Unchanged { host, ip: detected })
        }
        Action::Update { previous } => {
            if config.dry_run {
                info!("dry-run: not updating the record for {}", host);
            } else {
                api.edit_record(
                    config.domain.to_owned(),
                    config.subdomain.to_owned(),
                    detected,
                    config.ttl,
                )?;
            }
            Ok(Outcome::Updated {
                host,
                previous,
                current: detected,
            })
        }
    }
}
