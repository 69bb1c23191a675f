use std::sync::Arc;

use anyhow::Context;
use signaid_config::Config;
use signaid_lang_asl::{AslVocabulary, GeminiMatcher, SignProcessor, VocabularyLoader};
use signaid_media::MediaLibrary;
use signaid_remote::RemoteMatcher;

/// Shared request state, immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub processor: Arc<SignProcessor>,
    pub remote: Option<Arc<dyn RemoteMatcher>>,
    pub media: Arc<MediaLibrary>,
}

impl AppState {
    pub fn new(
        config: Config,
        vocabulary: AslVocabulary,
        remote: Option<Arc<dyn RemoteMatcher>>,
    ) -> Self {
        let media = MediaLibrary::from_config(&config.media);

        Self {
            config: Arc::new(config),
            processor: Arc::new(SignProcessor::new(Arc::new(vocabulary))),
            remote,
            media: Arc::new(media),
        }
    }

    /// Load the vocabulary and build the remote matcher when a key is configured
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let vocabulary =
            VocabularyLoader::load_with_additional(&config.vocabulary.additional_paths)
                .context("failed to load sign vocabulary")?;

        let remote: Option<Arc<dyn RemoteMatcher>> = if config.remote.is_configured() {
            match GeminiMatcher::from_config(&config.remote) {
                Ok(matcher) => {
                    let metadata = matcher.metadata();
                    tracing::info!("Remote matcher ready: {} ({})", metadata.name, metadata.model);
                    Some(Arc::new(matcher))
                }
                Err(e) => {
                    tracing::warn!("Failed to build remote matcher, using local only: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("GEMINI_API_KEY not set, remote matching disabled");
            None
        };

        Ok(Self::new(config, vocabulary, remote))
    }

    pub fn vocabulary(&self) -> &AslVocabulary {
        self.processor.vocabulary()
    }
}
