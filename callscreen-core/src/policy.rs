use serde::{Deserialize, Serialize};

/// System-level instructions for the screener persona.
pub const BASE_INSTRUCTIONS: &str = "\
You are an AI phone call screener protecting an elderly user from scams.

General behaviour:
- The user is a 79 years old man and may be vulnerable to pressure, urgency and confusion.
- You NEVER directly connect the caller to the user. You only *recommend* what to do.
- Always be cautious if the caller asks for money, bank details, passwords, codes,
  remote access to the user's computer/phone, or personal information that is not
  strictly necessary.
- Speak clearly and simply. Avoid technical jargon.

Your outputs will be used to:
1) Decide whether the call should reach the user.
2) Generate a short spoken response back to the caller via Text-To-Speech.";

// The user's age lives on `CallContext`; the profile carries only what the
// call itself does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Micheal".into(),
        }
    }
}

/// Static screening heuristics plus the base persona instructions.
///
/// This is pure data; the prompt builder renders it into model input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    pub base_instructions: String,
    pub rules: Vec<String>,
    pub profile: UserProfile,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            base_instructions: BASE_INSTRUCTIONS.into(),
            rules: default_security_rules(),
            profile: UserProfile::default(),
        }
    }
}

pub fn default_security_rules() -> Vec<String> {
    [
        "The user is a 79-year-old man. Treat all unexpected calls with extra caution.",
        "If the caller mentions job sites such as Indeed or LinkedIn, treat this as suspicious \
         unless there is strong evidence that the user is actively expecting that call.",
        "If the caller asks for bank account details, credit/debit card numbers, PINs, \
         one-time codes, or passwords, classify the call as HIGH RISK.",
        "If the caller pressures the user with urgency (e.g., 'act now', 'you will be arrested', \
         'your account will be closed today'), this is a strong scam indicator.",
        "If the caller asks the user to install remote access software, classify as HIGH RISK.",
        "If the caller claims to be from a government body, bank, or tech company but cannot \
         provide clear verifiable information, treat as suspicious.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
