use crate::policy::ScreeningPolicy;
use crate::types::CallContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltScreeningPrompt {
    pub system_message: String,
    pub user_message: String,
}

/// Renders one call into the model input: user profile, call context, the
/// full rule catalog as a bulleted list, the verbatim transcript, and the
/// fixed JSON-output instruction block.
///
/// Pure function. The transcript is embedded as-is; no escaping is done, so
/// adversarial transcript text can collide with the prompt's own delimiters.
pub fn build_screening_prompt(
    transcript: &str,
    context: &CallContext,
    policy: &ScreeningPolicy,
) -> BuiltScreeningPrompt {
    let rules_text = policy
        .rules
        .iter()
        .map(|rule| format!("- {rule}"))
        .collect::<Vec<_>>()
        .join("\n");

    let user_message = format!(
        r#"You are screening a phone call for an elderly user.

User profile:
- Age: {age} years old
- Name: {name}

Call context:
- Caller ID: {caller}
- Call type: {call_type}

Security rules you MUST follow:
{rules_text}

Below is the transcript of what the CALLER has said so far.
Treat this as if you are listening to a live phone call.

CALLER TRANSCRIPT:
"""{transcript}"""

Your tasks:
1. Classify the call as one of: "safe", "suspicious", or "likely_scam".
2. Briefly explain the main reasons for your classification.
3. List any specific red flags you noticed (if any).
4. Decide what to do next for the user. Choose one:
   - "block_call"
   - "warn_and_block"
   - "allow_through"
   - "ask_more_questions"
5. Write a short, polite sentence that could be spoken back to the caller by a TTS
   system (e.g., "We cannot proceed with this call. Goodbye.").

Respond in JSON only with the following keys:
- classification
- reasoning
- red_flags
- action_for_user
- spoken_response_to_caller"#,
        age = context.user_age,
        name = policy.profile.name,
        caller = context.caller_display(),
        call_type = context.call_type.as_str(),
    );

    BuiltScreeningPrompt {
        system_message: policy.base_instructions.clone(),
        user_message,
    }
}
