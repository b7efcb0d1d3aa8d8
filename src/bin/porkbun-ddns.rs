mod cli;

use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use env_logger::Builder;
use log::{debug, info};
use thiserror::Error;

use porkbun_ddns::{
    config::{Config, ConfigError},
    credentials::{Credentials, CredentialsError},
    porkbun::PorkbunClient,
    sync::{self, Outcome, SyncError},
};

use cli::Cli;

fn main() {
    let cli = parse_cli();

    Builder::new().filter_level(cli.loglevel.into()).init();

    if cli.dry_run {
        info!("running in dry-run mode, no changes will be made");
    }

    let dry_run = cli.dry_run;
    match run(cli) {
        Ok(outcome) => report(&outcome, dry_run),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

// clap's defaults don't match the required exit behavior: a bare invocation
// shows the help text (exit 0), usage errors exit 1 rather than clap's 2.
fn parse_cli() -> Cli {
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        process::exit(0);
    }
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    }
}

// Everything that can end the run early, funneled into the single diagnostic
// line that main prints before exiting 1.
#[derive(Debug, Error)]
enum RunError {
    #[error("Missing required flag --creds")]
    MissingCreds,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

fn run(cli: Cli) -> Result<Outcome, RunError> {
    let config = Config::new(
        cli.domain,
        cli.subdomain,
        Some(cli.ttl.as_str()),
        cli.dry_run,
    )?;
    let creds_path = cli.creds.ok_or(RunError::MissingCreds)?;
    let credentials = Credentials::load(&creds_path)?;
    debug!("loaded credentials from {}", creds_path.display());

    let client = PorkbunClient::new(credentials);
    Ok(sync::synchronize(&client, &config)?)
}

// A no-op run stays silent on stdout; creates and updates are confirmed.
fn report(outcome: &Outcome, dry_run: bool) {
    if let Some(line) = confirmation(outcome, dry_run) {
        println!("{}", line);
    } else if let Outcome::Unchanged { host, ip } = outcome {
        debug!("record for {} already points at {}, nothing to do", host, ip);
    }
}

// The stdout line a run earns, if any.
fn confirmation(outcome: &Outcome, dry_run: bool) -> Option<String> {
    match outcome {
        Outcome::Created { host, ip } if dry_run => {
            Some(format!("Would create record for {} with value {}", host, ip))
        }
        Outcome::Created { host, ip } => {
            Some(format!("Created record for {} with value {}", host, ip))
        }
        Outcome::Updated {
            host,
            previous,
            current,
        } if dry_run => Some(format!(
            "Would update record for {} from {} to {}",
            host, previous, current
        )),
        Outcome::Updated {
            host,
            previous,
            current,
        } => Some(format!(
            "Updated record for {} from {} to {}",
            host, previous, current
        )),
        Outcome::Unchanged { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::Ipv4Addr;

    const IP: Ipv4Addr = Ipv4Addr::new(1, 2, 3, 4);

    #[test]
    fn created_outcome_prints_the_confirmation_line() {
        let outcome = Outcome::Created {
            host: "example.com".into(),
            ip: IP,
        };
        assert_eq!(
            confirmation(&outcome, false).as_deref(),
            Some("Created record for example.com with value 1.2.3.4")
        );
        assert_eq!(
            confirmation(&outcome, true).as_deref(),
            Some("Would create record for example.com with value 1.2.3.4")
        );
    }

    #[test]
    fn updated_outcome_names_old_and_new() {
        let outcome = Outcome::Updated {
            host: "home.example.com".into(),
            previous: "5.6.7.8".into(),
            current: IP,
        };
        assert_eq!(
            confirmation(&outcome, false).as_deref(),
            Some("Updated record for home.example.com from 5.6.7.8 to 1.2.3.4")
        );
        assert_eq!(
            confirmation(&outcome, true).as_deref(),
            Some("Would update record for home.example.com from 5.6.7.8 to 1.2.3.4")
        );
    }

    #[test]
    fn noop_prints_nothing() {
        let outcome = Outcome::Unchanged {
            host: "example.com".into(),
            ip: IP,
        };
        assert_eq!(confirmation(&outcome, false), None);
        assert_eq!(confirmation(&outcome, true), None);
    }

    #[test]
    fn failures_map_to_the_mandated_messages() {
        // RunError's Display is the exact line main writes to stderr.
        assert_eq!(
            RunError::MissingCreds.to_string(),
            "Missing required flag --creds"
        );
        assert_eq!(
            RunError::from(ConfigError::MissingDomain).to_string(),
            "Missing required flag --domain"
        );
        assert_eq!(
            RunError::from(ConfigError::InvalidTtl).to_string(),
            "TTL must be an integer."
        );
    }
}
