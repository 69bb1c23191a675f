use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "videos".to_string()
}

fn default_extension() -> String {
    "mp4".to_string()
}

fn default_url_prefix() -> String {
    "/videos".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory holding `<word>.<ext>` and `<letter>.<ext>` gesture videos
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Route prefix media files are served under
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            url_prefix: default_url_prefix(),
        }
    }
}

impl MediaConfig {
    pub(crate) fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(dir) = lookup("VIDEOS_DIR") {
            self.dir = dir;
        }
        if let Some(ext) = lookup("VIDEO_EXTENSION") {
            self.extension = ext.trim_start_matches('.').to_string();
        }
    }
}
