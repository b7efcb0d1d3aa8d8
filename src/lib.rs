//! Main crate for the `porkbun-ddns` application.
//!
//! The binary wires these modules together; they can also be used as a library
//! to drive the same workflow from other code:
//! - [`config`] holds the validated per-run settings (domain, subdomain, TTL)
//! - [`credentials`] loads the Porkbun API key pair from a JSON file
//! - [`porkbun`] speaks the Porkbun v3 JSON API and defines the [`porkbun::PorkbunApi`] seam
//! - [`sync`] decides whether the A record needs to be created, updated or left alone

pub mod config;
pub mod credentials;
pub mod porkbun;
pub mod sync;
