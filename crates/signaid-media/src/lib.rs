use std::collections::HashMap;
use std::path::{Path, PathBuf};

use signaid_config::media::MediaConfig;
use signaid_types::MatchResult;

/// Gesture videos on disk, looked up case-insensitively by `<name>.<ext>`
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    dir: PathBuf,
    extension: String,
    url_prefix: String,
}

impl MediaLibrary {
    pub fn new(dir: impl Into<PathBuf>, extension: &str, url_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_lowercase(),
            url_prefix: normalize_prefix(url_prefix),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(&config.dir, &config.extension, &config.url_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Route the media files are served under, always `/`-prefixed
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// List the media directory. A missing or unreadable directory yields an
    /// empty index; absent media is not an error.
    pub async fn scan(&self) -> MediaIndex {
        let mut files = HashMap::new();

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Media directory {} unavailable: {}", self.dir.display(), e);
                return self.index(files);
            }
        };

        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_file = entry
                        .file_type()
                        .await
                        .map(|t| t.is_file() || t.is_symlink())
                        .unwrap_or(false);
                    if !is_file {
                        continue;
                    }
                    if let Ok(name) = entry.file_name().into_string() {
                        files.insert(name.to_lowercase(), name);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("Stopped reading media directory {}: {}", self.dir.display(), e);
                    break;
                }
            }
        }

        tracing::debug!("Indexed {} media files", files.len());
        self.index(files)
    }

    /// Scan the directory and attach media references to `signs`
    pub async fn enrich(&self, signs: &mut [MatchResult]) {
        if signs.is_empty() {
            return;
        }
        self.scan().await.enrich(signs);
    }

    fn index(&self, files: HashMap<String, String>) -> MediaIndex {
        MediaIndex {
            files,
            extension: self.extension.clone(),
            url_prefix: self.url_prefix.clone(),
        }
    }
}

fn normalize_prefix(prefix: &str) -> String {
    match prefix.trim().trim_matches('/') {
        "" => "/videos".to_string(),
        trimmed => format!("/{trimmed}"),
    }
}

/// Snapshot of the media directory: lowercase file name to actual file name
#[derive(Debug, Clone)]
pub struct MediaIndex {
    files: HashMap<String, String>,
    extension: String,
    url_prefix: String,
}

impl MediaIndex {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// URL of the media file named after `name`, if one exists
    pub fn url_for(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let key = format!("{}.{}", name.to_lowercase(), self.extension);
        self.files
            .get(&key)
            .map(|actual| format!("{}/{}", self.url_prefix, urlencoding::encode(actual)))
    }

    /// Attach `video_url` for whole-word media and, on fingerspelled results,
    /// `letter_videos` when at least one letter has a video.
    pub fn enrich(&self, signs: &mut [MatchResult]) {
        for sign in signs.iter_mut() {
            if let Some(url) = self.url_for(sign.word()) {
                sign.video_url = Some(url);
            }

            if !sign.is_fingerspelled() {
                continue;
            }

            let letter_videos: Vec<Option<String>> = sign
                .letters
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|ch| {
                    if ch.is_alphabetic() {
                        self.url_for(&ch.to_string())
                    } else {
                        None
                    }
                })
                .collect();

            if letter_videos.iter().any(Option::is_some) {
                sign.letter_videos = Some(letter_videos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use signaid_types::{Category, VocabularyEntry};

    use super::*;

    fn sign(word: &str, category: Category, letters: Option<Vec<char>>) -> MatchResult {
        MatchResult {
            entry: VocabularyEntry {
                word: word.to_string(),
                category,
                synonyms: vec![],
                description: String::new(),
                animation_type: None,
                animation_data: None,
            },
            confidence: 1.0,
            matched_from: word.to_string(),
            letters,
            video_url: None,
            letter_videos: None,
        }
    }

    fn library_with(files: &[&str]) -> (tempfile::TempDir, MediaLibrary) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let library = MediaLibrary::new(dir.path(), "mp4", "/videos");
        (dir, library)
    }

    #[tokio::test]
    async fn test_word_video_is_case_insensitive() {
        let (_dir, library) = library_with(&["Hello.MP4", "Thank You.mp4"]);
        let mut signs = vec![
            sign("hello", Category::Greetings, None),
            sign("thank you", Category::Greetings, None),
            sign("please", Category::Greetings, None),
        ];

        library.enrich(&mut signs).await;

        assert_eq!(signs[0].video_url.as_deref(), Some("/videos/Hello.MP4"));
        assert_eq!(signs[1].video_url.as_deref(), Some("/videos/Thank%20You.mp4"));
        assert_eq!(signs[2].video_url, None);
    }

    #[tokio::test]
    async fn test_letter_videos_keep_positions() {
        let (_dir, library) = library_with(&["a.mp4", "C.mp4"]);
        let mut signs = vec![sign("cab", Category::Fingerspelled, Some(vec!['c', 'a', 'b']))];

        library.enrich(&mut signs).await;

        assert_eq!(
            signs[0].letter_videos,
            Some(vec![
                Some("/videos/C.mp4".to_string()),
                Some("/videos/a.mp4".to_string()),
                None,
            ])
        );
    }

    #[tokio::test]
    async fn test_no_letter_videos_when_none_exist() {
        let (_dir, library) = library_with(&["hello.mp4"]);
        let mut signs = vec![sign("xyz", Category::Fingerspelled, Some(vec!['x', 'y', 'z']))];

        library.enrich(&mut signs).await;

        assert_eq!(signs[0].letter_videos, None);
        assert_eq!(signs[0].video_url, None);
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = MediaLibrary::new(dir.path().join("absent"), "mp4", "/videos");
        let mut signs = vec![sign("hello", Category::Greetings, None)];

        assert!(library.scan().await.is_empty());
        library.enrich(&mut signs).await;
        assert_eq!(signs[0].video_url, None);
    }

    #[test]
    fn test_url_prefix_normalized() {
        assert_eq!(MediaLibrary::new("videos", "mp4", "media/").url_prefix(), "/media");
        assert_eq!(MediaLibrary::new("videos", "mp4", "/").url_prefix(), "/videos");
        assert_eq!(MediaLibrary::new("videos", ".MP4", "/videos").extension, "mp4");
    }

    #[tokio::test]
    async fn test_other_extensions_and_directories_ignored() {
        let (dir, library) = library_with(&["hello.webm"]);
        fs::create_dir(dir.path().join("yes.mp4")).unwrap();

        let index = library.scan().await;
        assert_eq!(index.len(), 1);
        assert_eq!(index.url_for("hello"), None);
        assert_eq!(index.url_for("yes"), None);
    }
}
