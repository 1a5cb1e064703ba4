use async_trait::async_trait;
use callscreen_core::config::SpeechSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw text returned by the classification service, with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierReply {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedAudio {
    pub path: PathBuf,
    pub provider: String,
    pub model: String,
}

#[async_trait]
pub trait CallClassifier: Send + Sync {
    async fn classify(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        instructions: &str,
        prompt: &str,
    ) -> anyhow::Result<ClassifierReply>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` and writes the audio to `dest`.
    async fn synthesize(
        &self,
        base_url: &str,
        api_key: &str,
        settings: &SpeechSettings,
        text: &str,
        dest: &Path,
    ) -> anyhow::Result<SynthesizedAudio>;
}

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, path: &Path) -> anyhow::Result<()>;
}
