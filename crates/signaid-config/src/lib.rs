use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::media::MediaConfig;
use self::rate_limit::RateLimitConfig;
use self::remote::RemoteConfig;
use self::server::ServerConfig;
use self::vocabulary::VocabularyConfig;

pub mod log;
pub mod media;
pub mod rate_limit;
pub mod remote;
pub mod server;
pub mod vocabulary;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub remote: RemoteConfig,
    pub media: MediaConfig,
    pub vocabulary: VocabularyConfig,
    pub rate_limit: RateLimitConfig,
    pub log: LogConfig,
}

impl Config {
    /// Apply environment overrides from `lookup` on top of the current values
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.apply_env(&lookup);
        self.remote.apply_env(&lookup);
        self.media.apply_env(&lookup);
        self.rate_limit.apply_env(&lookup);
        self.log.apply_env(&lookup);
        self
    }
}

/// Read `key` through `lookup` and parse it, ignoring unparsable values
pub(crate) fn env_parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_body_bytes, 64 * 1024);
        assert_eq!(config.server.max_text_chars, 2000);
        assert_eq!(config.remote.model, "gemini-2.0-flash");
        assert!(!config.remote.is_configured());
        assert_eq!(config.media.extension, "mp4");
        assert_eq!(config.media.url_prefix, "/videos");
        assert_eq!(config.rate_limit.match_per_minute, 120);
        assert_eq!(config.rate_limit.default_per_minute, 60);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env(lookup_from(&[
            ("PORT", "8080"),
            ("GEMINI_API_KEY", "secret"),
            ("VIDEOS_DIR", "/srv/videos"),
            ("RATE_LIMIT_ENABLED", "false"),
            ("LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.server.port, 8080);
        assert!(config.remote.is_configured());
        assert_eq!(config.media.dir, "/srv/videos");
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.log.format, log::LogFormat::Json);
    }

    #[test]
    fn test_unparsable_env_keeps_default() {
        let config = Config::default().with_env(lookup_from(&[("PORT", "not-a-port")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_blank_api_key_is_not_configured() {
        let config = Config::default().with_env(lookup_from(&[("GEMINI_API_KEY", "   ")]));
        assert!(!config.remote.is_configured());
    }

    #[test]
    fn test_partial_profile_uses_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"server": {"port": 9000}, "vocabulary": {"additional_paths": ["extra.json"]}}"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.vocabulary.additional_paths, vec!["extra.json".to_string()]);
        assert_eq!(config.remote.timeout_seconds, 15);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = Config::default();
        config.remote.api_key = "secret".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
