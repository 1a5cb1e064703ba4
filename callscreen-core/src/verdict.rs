use crate::types::{Classification, RecommendedAction};
use serde::{Deserialize, Serialize};

/// Safety-net sentence used whenever the model's output cannot be understood
/// or omits a spoken response.
pub const FALLBACK_SPOKEN_LINE: &str = "We cannot proceed with this call. Goodbye.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningVerdict {
    pub classification: Classification,
    pub reasoning: String,
    pub red_flags: Vec<String>,
    pub action: RecommendedAction,
    pub spoken_response: Option<String>,
}

impl ScreeningVerdict {
    /// Verdict substituted when the model output fails to decode. Only the
    /// spoken line is populated.
    pub fn fallback() -> Self {
        Self {
            classification: Classification::Unknown,
            reasoning: String::new(),
            red_flags: vec![],
            action: RecommendedAction::Unknown,
            spoken_response: Some(FALLBACK_SPOKEN_LINE.into()),
        }
    }

    /// The line to hand to speech synthesis. Falls back independently when
    /// the field is missing or blank, even for otherwise well-formed verdicts.
    pub fn spoken_line(&self) -> &str {
        self.spoken_response
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_SPOKEN_LINE)
    }
}

// Wire shape as requested from the model. Every field is optional so a
// well-formed object with missing keys still decodes; a type mismatch or
// non-JSON output fails the whole decode.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    classification: Option<String>,
    reasoning: Option<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    action_for_user: Option<String>,
    spoken_response_to_caller: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub verdict: ScreeningVerdict,
    /// Decode diagnostic when the fallback verdict was substituted.
    pub parse_error: Option<String>,
}

/// Strict decode of the raw classifier text. Either the whole object decodes
/// or the entire structured result is discarded in favor of the fallback;
/// no partial field recovery is attempted.
pub fn parse_verdict(raw: &str) -> ParsedVerdict {
    match serde_json::from_str::<RawVerdict>(raw) {
        Ok(raw) => ParsedVerdict {
            verdict: ScreeningVerdict {
                classification: raw
                    .classification
                    .as_deref()
                    .map(Classification::from_label)
                    .unwrap_or(Classification::Unknown),
                reasoning: raw.reasoning.unwrap_or_default(),
                red_flags: raw.red_flags,
                action: raw
                    .action_for_user
                    .as_deref()
                    .map(RecommendedAction::from_label)
                    .unwrap_or(RecommendedAction::Unknown),
                spoken_response: raw.spoken_response_to_caller,
            },
            parse_error: None,
        },
        Err(e) => ParsedVerdict {
            verdict: ScreeningVerdict::fallback(),
            parse_error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_verdict_passes_spoken_line_unchanged() {
        let raw = r#"{
            "classification": "likely_scam",
            "reasoning": "asks for PIN",
            "red_flags": ["requests bank credentials", "urgency"],
            "action_for_user": "block_call",
            "spoken_response_to_caller": "We cannot continue. Goodbye."
        }"#;
        let parsed = parse_verdict(raw);
        assert!(parsed.parse_error.is_none());
        assert_eq!(parsed.verdict.classification, Classification::LikelyScam);
        assert_eq!(parsed.verdict.action, RecommendedAction::BlockCall);
        assert_eq!(parsed.verdict.red_flags.len(), 2);
        assert_eq!(parsed.verdict.spoken_line(), "We cannot continue. Goodbye.");
    }

    #[test]
    fn non_json_output_substitutes_fallback() {
        let parsed = parse_verdict("not json");
        assert!(parsed.parse_error.is_some());
        assert_eq!(parsed.verdict.spoken_line(), FALLBACK_SPOKEN_LINE);
        assert_eq!(parsed.verdict.classification, Classification::Unknown);
    }

    #[test]
    fn missing_spoken_response_falls_back_independently() {
        let raw = r#"{"classification": "safe", "action_for_user": "allow_through"}"#;
        let parsed = parse_verdict(raw);
        assert!(parsed.parse_error.is_none());
        assert_eq!(parsed.verdict.classification, Classification::Safe);
        assert_eq!(parsed.verdict.spoken_line(), FALLBACK_SPOKEN_LINE);
    }

    #[test]
    fn blank_spoken_response_falls_back() {
        let raw = r#"{"spoken_response_to_caller": "   "}"#;
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.verdict.spoken_line(), FALLBACK_SPOKEN_LINE);
    }

    #[test]
    fn unrecognized_labels_map_to_unknown() {
        let raw = r#"{
            "classification": "extremely_dangerous",
            "action_for_user": "call_the_police"
        }"#;
        let parsed = parse_verdict(raw);
        assert_eq!(parsed.verdict.classification, Classification::Unknown);
        assert_eq!(parsed.verdict.action, RecommendedAction::Unknown);
    }

    #[test]
    fn type_mismatch_discards_entire_result() {
        // red_flags as a string instead of a list fails the whole decode.
        let raw = r#"{"red_flags": "urgency", "spoken_response_to_caller": "Hello"}"#;
        let parsed = parse_verdict(raw);
        assert!(parsed.parse_error.is_some());
        assert_eq!(parsed.verdict.spoken_line(), FALLBACK_SPOKEN_LINE);
    }
}
