//! # Client configuration - `client.toml`
//!
//! Where the client finds the API server and how it names its storage keys.
//! Every field has a default, so a missing or empty file is equivalent to
//! [`ClientConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//!
//! [storage]
//! prefix = "wellness"     # keys become wellness.token, wellness.adminUser, ...
//! ```
//!
//! The storage prefix must stay stable across releases of a deployment,
//! otherwise every user is logged out on upgrade.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// REST API location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Durable storage naming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_prefix() -> String {
    "wellness".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another API server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ClientConfig::from_toml("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.example.edu/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.edu");
        assert_eq!(config.storage.prefix, "wellness");
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ClientConfig::default().with_base_url("https://x.test/api/");
        let text = config.to_toml().unwrap();
        assert!(text.contains("base_url = \"https://x.test/api\""));
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
