use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

/// Remote (generative text) matcher settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Never written back out when the config is serialized
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RemoteConfig {
    pub(crate) fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.api_key = key.trim().to_string();
        }
        if let Some(url) = lookup("GEMINI_API_URL") {
            self.api_url = url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(timeout) = env_parse(lookup, "GEMINI_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout;
        }
    }

    /// Remote matching is possible only with a non-empty credential
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}
