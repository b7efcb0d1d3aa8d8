//! Per-run settings, validated once at startup.

use thiserror::Error;

/// TTL of a DNS record, in seconds.
pub type Ttl = u32;

/// TTL applied to created and updated records when `--ttl` is not given.
pub const DEFAULT_TTL: Ttl = 600;

/// Validated configuration for a single run.
///
/// Use [`Config::new`] to build one from raw flag values; it enforces the
/// invariants (non-empty domain, numeric TTL) and fills in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Registered domain whose A record is managed, e.g. `example.com`.
    pub domain: String,
    /// Optional subdomain; `None` manages the record on the domain root.
    pub subdomain: Option<String>,
    /// TTL in seconds for any record this run creates or updates.
    pub ttl: Ttl,
    /// When set, the write call is skipped and only reported.
    pub dry_run: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required flag --domain")]
    MissingDomain,
    #[error("TTL must be an integer.")]
    InvalidTtl,
}

impl Config {
    /// Validate raw flag values into a [`Config`].
    ///
    /// `ttl` is taken as the raw flag string so that anything other than
    /// `^[0-9]+$` can be rejected with a diagnostic instead of a parse panic.
    /// An empty subdomain is treated as "manage the domain root".
    pub fn new(
        domain: Option<String>,
        subdomain: Option<String>,
        ttl: Option<&str>,
        dry_run: bool,
    ) -> Result<Config, ConfigError> {
        let domain = domain
            .filter(|d| !d.trim().is_empty())
            .ok_or(ConfigError::MissingDomain)?;
        let subdomain = subdomain.filter(|s| !s.is_empty());
        let ttl = match ttl {
            Some(raw) => parse_ttl(raw)?,
            None => DEFAULT_TTL,
        };
        Ok(Config {
            domain,
            subdomain,
            ttl,
            dry_run,
        })
    }

    /// The fully qualified name being managed: `subdomain.domain`, or just
    /// `domain` if no subdomain is configured.
    pub fn host(&self) -> String {
        match &self.subdomain {
            Some(sub) => format!("{}.{}", sub, self.domain),
            None => self.domain.to_owned(),
        }
    }
}

fn parse_ttl(raw: &str) -> Result<Ttl, ConfigError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidTtl);
    }
    raw.parse().map_err(|_| ConfigError::InvalidTtl)
}
