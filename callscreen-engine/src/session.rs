use crate::traits::{ClassifierReply, SynthesizedAudio};
use callscreen_core::types::{CallContext, CallId};
use callscreen_core::verdict::ScreeningVerdict;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningStage {
    Classifying,
    Parsing,
    Synthesizing,
    Playing,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreeningTimings {
    pub classification_ms: Option<u64>,
    pub synthesis_ms: Option<u64>,
}

/// Everything one screening run produced, recoverable at any stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub call_id: CallId,
    pub stage: ScreeningStage,

    // A stable string label for UI display.
    // This is intentionally not derived from `Debug`.
    pub stage_label: Option<String>,

    pub context: CallContext,
    pub reply: Option<ClassifierReply>,
    pub verdict: Option<ScreeningVerdict>,
    pub parse_error: Option<String>,
    pub spoken_line: Option<String>,
    pub audio: Option<SynthesizedAudio>,
    pub timings: ScreeningTimings,
    pub error: Option<String>,
}

impl ScreeningReport {
    pub fn started(context: CallContext) -> Self {
        Self {
            call_id: CallId::new(),
            stage: ScreeningStage::Classifying,
            stage_label: None,
            context,
            reply: None,
            verdict: None,
            parse_error: None,
            spoken_line: None,
            audio: None,
            timings: ScreeningTimings::default(),
            error: None,
        }
    }
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
