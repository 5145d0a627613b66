//! Declarative store configuration.
//!
//! ```toml
//! name = "docs"
//! ttl_secs = 3600
//! rules = """
//! public-read|list
//! editors-read|write
//! """
//! ```
//!
//! Hosts read the text however they like and hand it to
//! [`AclConfig::from_toml_str`], then build the store with
//! [`Acl::from_config`](crate::Acl::from_config).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for building an [`Acl`](crate::Acl).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Optional human-readable name.
    pub name: Option<String>,
    /// Time-to-live in seconds. Recorded on the store, never enforced.
    pub ttl_secs: Option<u64>,
    /// Rule text in the rule language.
    pub rules: String,
}

impl AclConfig {
    /// Parses configuration from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("Failed to parse ACL config: {e}")))
    }

    /// Serializes configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The TTL as a duration.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}
