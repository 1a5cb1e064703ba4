use crate::session::{ScreeningReport, ScreeningStage, ms};
use crate::traits::{AudioPlayer, CallClassifier, SpeechSynthesizer};
use callscreen_core::config::ScreenerConfig;
use callscreen_core::policy::ScreeningPolicy;
use callscreen_core::prompt::build_screening_prompt;
use callscreen_core::types::CallContext;
use callscreen_core::verdict::parse_verdict;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

const STAGE_CLASSIFYING: &str = "classifying";
const STAGE_PARSING: &str = "parsing";
const STAGE_SYNTHESIZING: &str = "synthesizing";
const STAGE_PLAYING: &str = "playing";
const STAGE_DONE: &str = "done";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transcript is empty")]
    EmptyTranscript,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub policy: ScreeningPolicy,
    pub screener: ScreenerConfig,
    pub output_dir: PathBuf,

    // Service auth is currently global for both remote calls.
    pub api_key: String,
}

impl EngineConfig {
    /// Destination of the synthesized reply. The filename is fixed by
    /// default, so successive runs overwrite the previous artifact.
    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join(&self.screener.output_filename)
    }
}

pub struct ScreeningEngine {
    cfg: EngineConfig,
    classifier: Arc<dyn CallClassifier>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn AudioPlayer>,
}

impl ScreeningEngine {
    pub fn new(
        cfg: EngineConfig,
        classifier: Arc<dyn CallClassifier>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        Self {
            cfg,
            classifier,
            synthesizer,
            player,
        }
    }

    /// Runs the full pipeline (classify -> parse -> synthesize -> play).
    pub async fn run_screening(
        &self,
        transcript: &str,
        context: CallContext,
    ) -> anyhow::Result<ScreeningReport> {
        self.run_screening_with_hook(transcript, context, |_stage| async {})
            .await
    }

    /// Same as `run_screening`, but emits a stage hook as the pipeline
    /// progresses. The hook is intended for console/UI progress and must be
    /// fast.
    pub async fn run_screening_with_hook<F, Fut>(
        &self,
        transcript: &str,
        context: CallContext,
        on_stage: F,
    ) -> anyhow::Result<ScreeningReport>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        if transcript.trim().is_empty() {
            return Err(EngineError::EmptyTranscript.into());
        }

        let mut report = ScreeningReport::started(context.clone());

        // 1) Classify
        report.stage = ScreeningStage::Classifying;
        report.stage_label = Some(STAGE_CLASSIFYING.into());
        on_stage(STAGE_CLASSIFYING).await;

        let prompt = build_screening_prompt(transcript, &context, &self.cfg.policy);

        let t0 = Instant::now();
        let reply = self
            .classifier
            .classify(
                &self.cfg.screener.llm.base_url,
                &self.cfg.api_key,
                &self.cfg.screener.llm.model,
                &prompt.system_message,
                &prompt.user_message,
            )
            .await?;
        report.timings.classification_ms = Some(ms(t0.elapsed()));

        // 2) Parse, substituting the fallback verdict on decode failure.
        report.stage = ScreeningStage::Parsing;
        report.stage_label = Some(STAGE_PARSING.into());
        on_stage(STAGE_PARSING).await;

        let parsed = parse_verdict(&reply.text);
        // The spoken line falls back on its own even for well-formed verdicts.
        let spoken_line = parsed.verdict.spoken_line().to_string();

        report.reply = Some(reply);
        report.parse_error = parsed.parse_error;
        report.verdict = Some(parsed.verdict);
        report.spoken_line = Some(spoken_line.clone());

        // 3) Synthesize
        report.stage = ScreeningStage::Synthesizing;
        report.stage_label = Some(STAGE_SYNTHESIZING.into());
        on_stage(STAGE_SYNTHESIZING).await;

        let dest = self.cfg.audio_path();
        let s0 = Instant::now();
        let audio = self
            .synthesizer
            .synthesize(
                &self.cfg.screener.llm.base_url,
                &self.cfg.api_key,
                &self.cfg.screener.speech,
                &spoken_line,
                &dest,
            )
            .await?;
        report.timings.synthesis_ms = Some(ms(s0.elapsed()));
        report.audio = Some(audio);

        // 4) Play. Failure here is recoverable: everything up to the audio
        // artifact is already on the report.
        report.stage = ScreeningStage::Playing;
        report.stage_label = Some(STAGE_PLAYING.into());
        on_stage(STAGE_PLAYING).await;

        if let Err(e) = self.player.play(&dest).await {
            report.stage = ScreeningStage::Failed;
            report.stage_label = Some("failed".into());
            report.error = Some(e.to_string());
            return Ok(report);
        }

        report.stage = ScreeningStage::Done;
        report.stage_label = Some(STAGE_DONE.into());
        on_stage(STAGE_DONE).await;
        Ok(report)
    }
}
