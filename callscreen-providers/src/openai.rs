use crate::request::{Body, HttpRequest};
use callscreen_core::config::SpeechSettings;
use serde_json::json;

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiResponsesConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for OpenAiResponsesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiResponsesConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// One-shot classification call against the Responses API.
pub fn build_responses_request(
    cfg: &OpenAiResponsesConfig,
    instructions: &str,
    input: &str,
) -> HttpRequest {
    let url = join_url(&cfg.base_url, "/responses");

    let payload = json!({
        "model": cfg.model,
        "instructions": instructions,
        "input": input,
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Authorization".into(), format!("Bearer {}", cfg.api_key)),
        ],
        body: Body::Json(payload.to_string()),
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiSpeechConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub voice: String,
    pub style: String,
}

impl std::fmt::Debug for OpenAiSpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSpeechConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("voice", &self.voice)
            .finish()
    }
}

impl OpenAiSpeechConfig {
    pub fn from_settings(
        settings: &SpeechSettings,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: settings.model.clone(),
            voice: settings.voice.clone(),
            style: settings.style.clone(),
        }
    }
}

/// Speech synthesis call. The response body is a binary MP3 stream.
pub fn build_speech_request(cfg: &OpenAiSpeechConfig, input: &str) -> HttpRequest {
    let url = join_url(&cfg.base_url, "/audio/speech");

    let payload = json!({
        "model": cfg.model,
        "voice": cfg.voice,
        "input": input,
        "instructions": cfg.style,
        "response_format": "mp3",
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Accept".into(), "audio/mpeg".into()),
            ("Authorization".into(), format!("Bearer {}", cfg.api_key)),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("https://api.example.com/", "/responses"),
            "https://api.example.com/responses"
        );
        assert_eq!(
            join_url("https://api.example.com", "responses"),
            "https://api.example.com/responses"
        );
    }

    #[test]
    fn builds_authorized_responses_request() {
        let cfg = OpenAiResponsesConfig {
            base_url: "https://api.example.com/v1".into(),
            api_key: "k".into(),
            model: "gpt-5.1".into(),
        };
        let req = build_responses_request(&cfg, "screen calls", "caller transcript");

        assert_eq!(req.method, "POST");
        assert!(req.url.ends_with("/responses"));
        assert_eq!(req.header("authorization"), Some("Bearer k"));
        match req.body {
            Body::Json(s) => {
                assert!(s.contains("\"instructions\""));
                assert!(s.contains("caller transcript"));
            }
            _ => panic!("expected json"),
        }
    }

    #[test]
    fn builds_speech_request_with_voice_and_format() {
        let cfg = OpenAiSpeechConfig::from_settings(
            &SpeechSettings::default(),
            "https://api.example.com/v1",
            "k",
        );
        let req = build_speech_request(&cfg, "We cannot proceed with this call. Goodbye.");

        assert!(req.url.ends_with("/audio/speech"));
        assert_eq!(req.header("accept"), Some("audio/mpeg"));
        match req.body {
            Body::Json(s) => {
                assert!(s.contains("\"voice\":\"alloy\""));
                assert!(s.contains("\"response_format\":\"mp3\""));
                assert!(s.contains("We cannot proceed"));
            }
            _ => panic!("expected json"),
        }
    }

    #[test]
    fn debug_never_prints_api_key() {
        let cfg = OpenAiResponsesConfig {
            base_url: "https://api.example.com".into(),
            api_key: "sk-secret".into(),
            model: "gpt-5.1".into(),
        };
        let s = format!("{cfg:?}");
        assert!(!s.contains("sk-secret"));
        assert!(s.contains("[REDACTED]"));
    }
}
