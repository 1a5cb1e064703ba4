use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-5.1";
pub const DEFAULT_SPEECH_MODEL: &str = "gpt-4o-mini-tts";
pub const DEFAULT_SPEECH_VOICE: &str = "alloy";
pub const DEFAULT_SPEECH_STYLE: &str = "Speak clearly, calmly, and politely.";

// Fixed by default, so repeated runs overwrite the previous artifact.
pub const DEFAULT_OUTPUT_FILENAME: &str = "call_response.mp3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.into(),
            model: DEFAULT_CLASSIFIER_MODEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub model: String,
    pub voice: String,
    /// Delivery instruction passed alongside the text to synthesize.
    pub style: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_SPEECH_MODEL.into(),
            voice: DEFAULT_SPEECH_VOICE.into(),
            style: DEFAULT_SPEECH_STYLE.into(),
        }
    }
}

/// Non-secret screener configuration. The API key is sourced separately so
/// it never rides along in serialized config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    pub llm: LlmSettings,
    pub speech: SpeechSettings,
    pub output_filename: String,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            speech: SpeechSettings::default(),
            output_filename: DEFAULT_OUTPUT_FILENAME.into(),
        }
    }
}

impl ScreenerConfig {
    /// Defaults with environment overrides, matching the CLI surface.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("OPENAI_BASE_URL") {
            cfg.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("CALLSCREEN_LLM_MODEL") {
            cfg.llm.model = v;
        }
        if let Ok(v) = std::env::var("CALLSCREEN_TTS_MODEL") {
            cfg.speech.model = v;
        }
        if let Ok(v) = std::env::var("CALLSCREEN_TTS_VOICE") {
            cfg.speech.voice = v;
        }
        if let Ok(v) = std::env::var("CALLSCREEN_OUTPUT") {
            cfg.output_filename = v;
        }
        cfg
    }
}

/// Reads the API key from the environment. An empty value counts as missing.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingApiKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_constants() {
        let cfg = ScreenerConfig::default();
        assert_eq!(cfg.llm.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(cfg.llm.model, DEFAULT_CLASSIFIER_MODEL);
        assert_eq!(cfg.speech.voice, DEFAULT_SPEECH_VOICE);
        assert_eq!(cfg.output_filename, DEFAULT_OUTPUT_FILENAME);
    }
}
