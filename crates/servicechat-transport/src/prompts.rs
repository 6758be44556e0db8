//! Text the client sends on the user's behalf.

/// Value rendered for a birth-registration field the user has not filled.
pub const NOT_ANSWERED: &str = "Not answer";

/// First message of a scenario conversation.
pub fn scenario_greeting(title: &str) -> String {
    format!("I've selected the scenario: \"{title}\". Please greet me and ask how you can assist with this.")
}

/// First message of a conversation with no scenario.
pub fn custom_greeting() -> String {
    "I am a new user. Please greet me and ask how you can help with NSW government services.".to_string()
}

/// Sent before a conversation is wiped so the assistant can drop its context.
pub fn reset_notice(scenario_title: Option<&str>) -> String {
    format!(
        "User requested to clean the chat history for this scenario: {}",
        scenario_title.unwrap_or("custom scenario")
    )
}

/// A side-panel question about the birth-registration form.
///
/// `answers` are `(field, rendered value)` pairs in form order, with
/// [`NOT_ANSWERED`] for empty fields. The "current" answer is the last one
/// that is neither unanswered nor a checkbox. `info` paragraphs are appended
/// after the answers.
pub fn birth_form_question(question: &str, answers: &[(String, String)], info: &[&str]) -> String {
    let lines: Vec<String> = answers.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    let current = answers
        .iter()
        .rposition(|(_, v)| {
            let v = v.trim();
            !v.is_empty() && v != NOT_ANSWERED && v != "true" && v != "false"
        })
        .map(|i| lines[i].as_str())
        .unwrap_or("none");

    let mut prompt = format!(
        "User question about birth registration form: {question}\nCurrent QA: {current}\n\nCurrent form answers:\n{}",
        lines.join("\n")
    );
    for paragraph in info {
        prompt.push_str("\n\n");
        prompt.push_str(paragraph);
    }
    prompt
}
