use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_max_text_chars() -> usize {
    2000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request bodies above this size are rejected before parsing
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Match input is truncated to this many characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl ServerConfig {
    pub(crate) fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = env_parse(lookup, "PORT") {
            self.port = port;
        }
        if let Some(bytes) = env_parse(lookup, "MAX_BODY_BYTES") {
            self.max_body_bytes = bytes;
        }
        if let Some(chars) = env_parse(lookup, "MAX_TEXT_CHARS") {
            self.max_text_chars = chars;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
