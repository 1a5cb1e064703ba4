use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Incoming,
    Missed,
    Voicemail,
}

impl CallType {
    pub fn as_str(self) -> &'static str {
        match self {
            CallType::Incoming => "incoming",
            CallType::Missed => "missed",
            CallType::Voicemail => "voicemail",
        }
    }
}

/// Risk class the screener assigns to a call.
///
/// Remote output is free text; anything outside the known labels maps to
/// `Unknown` instead of being trusted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Safe,
    Suspicious,
    LikelyScam,
    Unknown,
}

impl Classification {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "safe" => Classification::Safe,
            "suspicious" => Classification::Suspicious,
            "likely_scam" => Classification::LikelyScam,
            _ => Classification::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Safe => "safe",
            Classification::Suspicious => "suspicious",
            Classification::LikelyScam => "likely_scam",
            Classification::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    BlockCall,
    WarnAndBlock,
    AllowThrough,
    AskMoreQuestions,
    Unknown,
}

impl RecommendedAction {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "block_call" => RecommendedAction::BlockCall,
            "warn_and_block" => RecommendedAction::WarnAndBlock,
            "allow_through" => RecommendedAction::AllowThrough,
            "ask_more_questions" => RecommendedAction::AskMoreQuestions,
            _ => RecommendedAction::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendedAction::BlockCall => "block_call",
            RecommendedAction::WarnAndBlock => "warn_and_block",
            RecommendedAction::AllowThrough => "allow_through",
            RecommendedAction::AskMoreQuestions => "ask_more_questions",
            RecommendedAction::Unknown => "unknown",
        }
    }
}

/// Metadata describing one screened call. Immutable for the duration of a
/// screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller_id: Option<String>,
    pub call_type: CallType,
    pub user_age: u32,
}

impl CallContext {
    pub fn new() -> Self {
        Self {
            caller_id: None,
            call_type: CallType::Incoming,
            user_age: 79,
        }
    }

    pub fn with_caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    pub fn with_call_type(mut self, call_type: CallType) -> Self {
        self.call_type = call_type;
        self
    }

    pub fn with_user_age(mut self, user_age: u32) -> Self {
        self.user_age = user_age;
        self
    }

    pub fn caller_display(&self) -> &str {
        self.caller_id.as_deref().unwrap_or("Unknown")
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
