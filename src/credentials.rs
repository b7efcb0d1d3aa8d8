//! Loading of the Porkbun API key pair from a JSON file.
//!
//! The file holds both halves of the pair:
//! `{ "apikey": "pk1_...", "secretapikey": "sk1_..." }`

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The API key pair sent with every Porkbun request.
///
/// Serializes straight to the wire field names (`apikey`, `secretapikey`), so
/// request bodies can embed it with `#[serde(flatten)]`.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(rename = "apikey")]
    pub api_key: String,
    #[serde(rename = "secretapikey")]
    pub secret_api_key: String,
}

// Key material must never reach log output, so Debug redacts both fields.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("secret_api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Failed to read creds file: {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse creds file: {}", .path.display())]
    Unparseable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("API key is null.")]
    ApiKeyMissing,
    #[error("Secret API key is null.")]
    SecretApiKeyMissing,
}

// Document shape before validation; either key may be absent or JSON-null.
#[derive(Debug, Deserialize)]
struct RawCredentials {
    #[serde(default)]
    apikey: Option<String>,
    #[serde(default)]
    secretapikey: Option<String>,
}

impl Credentials {
    /// Read and validate the key pair from the file at `path`.
    ///
    /// Fails without touching the network if the file is unreadable, is not a
    /// JSON object, or has either key absent/null.
    pub fn load(path: &Path) -> Result<Credentials, CredentialsError> {
        let bytes = fs::read(path).map_err(|source| CredentialsError::Unreadable {
            path: path.to_owned(),
            source,
        })?;
        let raw: RawCredentials =
            serde_json::from_slice(&bytes).map_err(|source| CredentialsError::Unparseable {
                path: path.to_owned(),
                source,
            })?;
        let api_key = raw.apikey.ok_or(CredentialsError::ApiKeyMissing)?;
        let secret_api_key = raw.secretapikey.ok_or(CredentialsError::SecretApiKeyMissing)?;
        Ok(Credentials {
            api_key,
            secret_api_key,
        })
    }
}
