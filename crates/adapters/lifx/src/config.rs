//! LIFX client configuration.

use serde::Deserialize;

/// Configuration for the LIFX device-control client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifxConfig {
    /// Base URL of the LIFX HTTP API, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LifxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.lifx.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}
