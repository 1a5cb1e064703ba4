use anyhow::Context;
use callscreen_core::config::{ScreenerConfig, SpeechSettings, api_key_from_env};
use callscreen_core::policy::ScreeningPolicy;
use callscreen_core::types::{CallContext, CallType};
use callscreen_engine::engine::{EngineConfig, ScreeningEngine};
use callscreen_engine::traits::{
    AudioPlayer, CallClassifier, ClassifierReply, SpeechSynthesizer, SynthesizedAudio,
};
use callscreen_platform::playback::SystemPlayer;
use callscreen_platform::test::NullPlayer;
use callscreen_providers::openai::{
    OpenAiResponsesConfig, OpenAiSpeechConfig, build_responses_request, build_speech_request,
};
use callscreen_providers::parse::parse_responses_output;
use callscreen_providers::runtime;
use std::path::Path;
use std::sync::Arc;

struct OpenAiClassifier;

#[async_trait::async_trait]
impl CallClassifier for OpenAiClassifier {
    async fn classify(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        instructions: &str,
        prompt: &str,
    ) -> anyhow::Result<ClassifierReply> {
        let cfg = OpenAiResponsesConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        };

        let req = build_responses_request(&cfg, instructions, prompt);
        let resp = runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!(
                "classification request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            ));
        }

        let text = parse_responses_output(&resp.body)?;
        Ok(ClassifierReply {
            text,
            provider: "openai".into(),
            model: model.into(),
        })
    }
}

struct OpenAiSpeech;

#[async_trait::async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(
        &self,
        base_url: &str,
        api_key: &str,
        settings: &SpeechSettings,
        text: &str,
        dest: &Path,
    ) -> anyhow::Result<SynthesizedAudio> {
        let cfg = OpenAiSpeechConfig::from_settings(settings, base_url, api_key);
        let req = build_speech_request(&cfg, text);
        runtime::stream_to_file(&req, dest)
            .await
            .context("speech synthesis failed")?;

        Ok(SynthesizedAudio {
            path: dest.to_path_buf(),
            provider: "openai".into(),
            model: settings.model.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Demo behavior: screen one mock scam call end to end.
    // Requires OPENAI_API_KEY; set CALLSCREEN_SKIP_PLAYBACK=1 for headless runs.

    let api_key = api_key_from_env().context("load screener credentials")?;
    let screener = ScreenerConfig::from_env();
    let output_dir = std::env::current_dir().context("resolve output directory")?;

    let player: Arc<dyn AudioPlayer> = if std::env::var("CALLSCREEN_SKIP_PLAYBACK").is_ok() {
        Arc::new(NullPlayer)
    } else {
        Arc::new(SystemPlayer::default())
    };

    let engine = ScreeningEngine::new(
        EngineConfig {
            policy: ScreeningPolicy::default(),
            screener,
            output_dir,
            api_key,
        },
        Arc::new(OpenAiClassifier),
        Arc::new(OpenAiSpeech),
        player,
    );

    let transcript = "Hello, this is your bank's security department. We detected suspicious \
                      activity on your account and it will be closed today unless you act now. \
                      Please confirm your PIN so we can secure it.";
    let context = CallContext::new()
        .with_caller_id("+353 83 123 4567")
        .with_call_type(CallType::Incoming);

    let report = engine
        .run_screening_with_hook(transcript, context, |stage| async move {
            println!("[stage] {stage}");
        })
        .await?;

    if let Some(reply) = &report.reply {
        println!("\n===== RAW MODEL OUTPUT =====");
        println!("{}", reply.text);
        println!("============================\n");
    }
    if let Some(err) = &report.parse_error {
        println!("could not parse model output ({err}); using the fallback line");
    }
    if let Some(verdict) = &report.verdict {
        println!(
            "classification={} action={}",
            verdict.classification.as_str(),
            verdict.action.as_str()
        );
    }
    if let Some(line) = &report.spoken_line {
        println!("Screener wants to say to the caller: {line}");
    }
    if let Some(audio) = &report.audio {
        println!("Audio saved to: {}", audio.path.display());
    }
    if let Some(err) = &report.error {
        println!("playback failed: {err}");
    }

    Ok(())
}
