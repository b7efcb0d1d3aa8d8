use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Keep a Porkbun DNS A record pointed at this machine's public IPv4 address
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain whose A record is managed, e.g. example.com
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Subdomain to manage instead of the domain root
    #[arg(long, value_name = "SUB")]
    pub subdomain: Option<String>,

    /// TTL in seconds for the created or updated record
    // Taken as a raw string: Config::new validates it, so a bad value exits 1
    // with its own diagnostic instead of clap's usage error (exit 2).
    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "600",
        allow_hyphen_values = true
    )]
    pub ttl: String,

    /// Path to the JSON file holding the Porkbun API key pair
    #[arg(long, value_name = "PATH")]
    pub creds: Option<PathBuf>,

    /// Do not make any changes to the DNS record, only show what would happen
    #[arg(long, short = 'd', default_value_t = false)]
    pub dry_run: bool,

    /// Set the loglevel of the application
    #[arg(value_enum, short = 'l', long, default_value_t = Loglevel::Warn, value_name = "LEVEL")]
    pub loglevel: Loglevel,
}

/// Used to set the applications loglevel
// This is essentially a re-creation of log::Level. However, that enum doesn't derive ValueEnum, so we have to do it manually here
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Loglevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl From<Loglevel> for LevelFilter {
    fn from(ll: Loglevel) -> Self {
        match ll {
            Loglevel::Error => LevelFilter::Error,
            Loglevel::Warn => LevelFilter::Warn,
            Loglevel::Info => LevelFilter::Info,
            Loglevel::Debug => LevelFilter::Debug,
            Loglevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_the_full_flag_set() {
        let cli = Cli::try_parse_from([
            "porkbun-ddns",
            "--domain=example.com",
            "--subdomain=home",
            "--ttl=3600",
            "--creds=/etc/porkbun/creds.json",
            "--dry-run",
            "--loglevel=debug",
        ])
        .unwrap();
        assert_eq!(cli.domain.as_deref(), Some("example.com"));
        assert_eq!(cli.subdomain.as_deref(), Some("home"));
        assert_eq!(cli.ttl, "3600");
        assert_eq!(cli.creds, Some(PathBuf::from("/etc/porkbun/creds.json")));
        assert!(cli.dry_run);
        assert_eq!(cli.loglevel, Loglevel::Debug);
    }

    #[test]
    fn defaults_are_applied() {
        let cli = Cli::try_parse_from(["porkbun-ddns", "--domain=example.com"]).unwrap();
        assert_eq!(cli.subdomain, None);
        assert_eq!(cli.ttl, "600");
        assert_eq!(cli.creds, None);
        assert!(!cli.dry_run);
        assert_eq!(cli.loglevel, Loglevel::Warn);
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        let err =
            Cli::try_parse_from(["porkbun-ddns", "--domain=example.com", "--frobnicate"])
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_distinguishable_from_usage_errors() {
        let err = Cli::try_parse_from(["porkbun-ddns", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn negative_ttl_reaches_the_validator() {
        // allow_hyphen_values: "-5" must become a value, not an unknown flag.
        let cli = Cli::try_parse_from(["porkbun-ddns", "--ttl", "-5"]).unwrap();
        assert_eq!(cli.ttl, "-5");
    }

    #[test]
    fn loglevel_maps_onto_levelfilter() {
        assert_eq!(LevelFilter::from(Loglevel::Error), LevelFilter::Error);
        assert_eq!(LevelFilter::from(Loglevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(Loglevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(Loglevel::Debug), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(Loglevel::Trace), LevelFilter::Trace);
    }
}
