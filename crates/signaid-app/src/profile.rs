use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use signaid_config::Config;

/// Build the runtime config: the profile at `path` (or defaults), then
/// environment overrides
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    load_config_with(path, |key| env::var(key).ok())
}

pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(path) => load_profile(path)?,
        None => Config::default(),
    };

    Ok(base.with_env(lookup))
}

/// Load a JSON config profile. Missing sections and fields keep their defaults.
fn load_profile(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path)
        .with_context(|| format!("failed to open config profile {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("invalid config profile {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use signaid_config::log::LogFormat;

    use super::*;

    #[test]
    fn test_profile_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{
                "server": {"port": 8080, "host": "0.0.0.0"},
                "vocabulary": {"additional_paths": ["extra.json"]},
                "log": {"format": "json"}
            }"#,
        )
        .unwrap();

        let config = load_config_with(Some(&path), |key| match key {
            "PORT" => Some("9090".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.vocabulary.additional_paths, vec!["extra.json"]);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.rate_limit.match_per_minute, 120);
    }

    #[test]
    fn test_no_profile_uses_defaults() {
        let config = load_config_with(None, |_| None).unwrap();
        assert_eq!(config.server.port, 5000);
        assert!(!config.remote.is_configured());
    }

    #[test]
    fn test_missing_or_invalid_profile() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_with(Some(&dir.path().join("absent.json")), |_| None).is_err());

        let path = dir.path().join("bad.json");
        fs::write(&path, "{ server: ").unwrap();
        assert!(load_config_with(Some(&path), |_| None).is_err());
    }
}
