use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_enabled() -> bool {
    true
}

fn default_match_per_minute() -> u32 {
    120
}

fn default_default_per_minute() -> u32 {
    60
}

/// Per-client request limits, counted over one-minute windows
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_match_per_minute")]
    pub match_per_minute: u32,
    /// Shared by every endpoint except `/api/match`
    #[serde(default = "default_default_per_minute")]
    pub default_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            match_per_minute: default_match_per_minute(),
            default_per_minute: default_default_per_minute(),
        }
    }
}

impl RateLimitConfig {
    pub(crate) fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(enabled) = env_parse(lookup, "RATE_LIMIT_ENABLED") {
            self.enabled = enabled;
        }
        if let Some(limit) = env_parse(lookup, "RATE_LIMIT_MATCH") {
            self.match_per_minute = limit;
        }
        if let Some(limit) = env_parse(lookup, "RATE_LIMIT_DEFAULT") {
            self.default_per_minute = limit;
        }
    }
}
