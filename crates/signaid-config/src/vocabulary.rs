use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Extra vocabulary files merged over the embedded table at startup
    #[serde(default)]
    pub additional_paths: Vec<String>,
}
