use async_trait::async_trait;
use callscreen_core::config::{ScreenerConfig, SpeechSettings};
use callscreen_core::policy::ScreeningPolicy;
use callscreen_core::types::{CallContext, Classification, RecommendedAction};
use callscreen_core::verdict::FALLBACK_SPOKEN_LINE;
use callscreen_engine::engine::{EngineConfig, ScreeningEngine};
use callscreen_engine::session::ScreeningStage;
use callscreen_engine::traits::{
    AudioPlayer, CallClassifier, ClassifierReply, SpeechSynthesizer, SynthesizedAudio,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct OpenAiClassifier;

#[async_trait]
impl CallClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        instructions: &str,
        prompt: &str,
    ) -> anyhow::Result<ClassifierReply> {
        let cfg = callscreen_providers::openai::OpenAiResponsesConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        };
        let req = callscreen_providers::openai::build_responses_request(&cfg, instructions, prompt);
        let resp = callscreen_providers::runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!("bad status {}", resp.status));
        }

        let text = callscreen_providers::parse::parse_responses_output(&resp.body)?;
        Ok(ClassifierReply {
            text,
            provider: "openai".into(),
            model: model.into(),
        })
    }
}

struct OpenAiSpeech;

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(
        &self,
        base_url: &str,
        api_key: &str,
        settings: &SpeechSettings,
        text: &str,
        dest: &Path,
    ) -> anyhow::Result<SynthesizedAudio> {
        let cfg =
            callscreen_providers::openai::OpenAiSpeechConfig::from_settings(settings, base_url, api_key);
        let req = callscreen_providers::openai::build_speech_request(&cfg, text);
        callscreen_providers::runtime::stream_to_file(&req, dest).await?;
        Ok(SynthesizedAudio {
            path: dest.to_path_buf(),
            provider: "openai".into(),
            model: settings.model.clone(),
        })
    }
}

struct MemoryPlayer {
    played: Arc<Mutex<Vec<PathBuf>>>,
}

#[async_trait]
impl AudioPlayer for MemoryPlayer {
    async fn play(&self, path: &Path) -> anyhow::Result<()> {
        self.played.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

fn responses_body(text: &str) -> String {
    serde_json::json!({
        "output": [{
            "type": "message",
            "content": [{"type": "output_text", "text": text}]
        }]
    })
    .to_string()
}

fn engine_for(server: &MockServer, output_dir: &Path, played: Arc<Mutex<Vec<PathBuf>>>) -> ScreeningEngine {
    let mut screener = ScreenerConfig::default();
    screener.llm.base_url = server.uri();

    ScreeningEngine::new(
        EngineConfig {
            policy: ScreeningPolicy::default(),
            screener,
            output_dir: output_dir.to_path_buf(),
            api_key: "test-key".into(),
        },
        Arc::new(OpenAiClassifier),
        Arc::new(OpenAiSpeech),
        Arc::new(MemoryPlayer { played }),
    )
}

#[tokio::test]
async fn end_to_end_screening_classifies_and_synthesizes_once() {
    let server = MockServer::start().await;

    let verdict = serde_json::json!({
        "classification": "likely_scam",
        "reasoning": "asks for a PIN",
        "red_flags": ["requests bank credentials"],
        "action_for_user": "block_call",
        "spoken_response_to_caller": "We cannot continue this call. Goodbye."
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(responses_body(&verdict), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_string_contains("We cannot continue this call."))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fake-mp3-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let played = Arc::new(Mutex::new(vec![]));
    let engine = engine_for(&server, dir.path(), played.clone());

    let report = engine
        .run_screening(
            "Hello, this is your bank, please confirm your PIN",
            CallContext::new().with_caller_id("+353 83 123 4567"),
        )
        .await
        .unwrap();

    assert_eq!(report.stage, ScreeningStage::Done);
    assert!(report.parse_error.is_none());

    let parsed = report.verdict.unwrap();
    assert_eq!(parsed.classification, Classification::LikelyScam);
    assert_eq!(parsed.action, RecommendedAction::BlockCall);
    assert_eq!(
        report.spoken_line.as_deref(),
        Some("We cannot continue this call. Goodbye.")
    );

    let audio_path = dir.path().join("call_response.mp3");
    assert_eq!(std::fs::read(&audio_path).unwrap(), b"ID3fake-mp3-bytes");
    assert_eq!(played.lock().unwrap().as_slice(), [audio_path]);
}

#[tokio::test]
async fn malformed_model_output_synthesizes_fallback_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(responses_body("not json"), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The fallback line must reach the synthesis endpoint verbatim.
    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .and(body_string_contains("We cannot proceed with this call."))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let played = Arc::new(Mutex::new(vec![]));
    let engine = engine_for(&server, dir.path(), played.clone());

    let report = engine
        .run_screening("Hello there", CallContext::new())
        .await
        .unwrap();

    assert_eq!(report.stage, ScreeningStage::Done);
    assert!(report.parse_error.is_some());
    assert_eq!(report.spoken_line.as_deref(), Some(FALLBACK_SPOKEN_LINE));
    assert_eq!(played.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn classifier_service_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let engine = engine_for(&server, dir.path(), Arc::new(Mutex::new(vec![])));

    let err = engine
        .run_screening("Hello there", CallContext::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("bad status 500"));
}
