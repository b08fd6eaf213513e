//! Connection configuration for the document store.
//!
//! Configuration is resolved once at startup from three layers, later layers
//! overriding earlier ones:
//!
//! 1. built-in defaults ([`StoreConfig::default`]),
//! 2. an optional `docbridge.toml` in the working directory,
//! 3. environment variables prefixed with `DOCBRIDGE_`
//!    (e.g. `DOCBRIDGE_API_KEY`, `DOCBRIDGE_ENDPOINT`).
//!
//! The resolved struct is injected into [`DocumentStore::new`] and read-only
//! afterwards; there is no process-global configuration, so tests can run
//! several differently configured stores in one process.
//!
//! [`DocumentStore::new`]: crate::DocumentStore::new

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Connection settings for one document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store's action API, without a trailing `/action`.
    pub endpoint: String,
    /// API key sent as the `api-key` header. No default; must come from
    /// `docbridge.toml` or `DOCBRIDGE_API_KEY`.
    pub api_key: String,
    /// Data-source (cluster) name the store multiplexes on.
    pub data_source: String,
    /// Database name within the data source.
    pub database: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            api_key: String::new(),
            data_source: "default".to_string(),
            database: "app".to_string(),
            timeout_secs: 5,
        }
    }
}

impl StoreConfig {
    /// The layered figment for this configuration.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("docbridge.toml"))
            .merge(Env::prefixed("DOCBRIDGE_"))
    }

    /// Loads configuration from defaults, `docbridge.toml`, and environment.
    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
