//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Share link issuance and cleanup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Number of days a share link remains valid after creation.
    #[serde(default = "default_link_ttl_days")]
    pub link_ttl_days: i64,
    /// Whether the background sweep of expired links is enabled.
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
    /// Interval between sweep runs, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            link_ttl_days: default_link_ttl_days(),
            sweep_enabled: default_sweep_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_link_ttl_days() -> i64 {
    7
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    3600
}
