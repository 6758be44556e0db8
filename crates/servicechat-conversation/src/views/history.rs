use servicechat_core::models::message::{ConversationMessage, MessageRole};
use servicechat_core::models::response::UserResponse;

/// Settled messages whose content contains `query`, ignoring case.
pub fn search_messages<'a>(messages: &'a [ConversationMessage], query: &str) -> Vec<&'a ConversationMessage> {
    let needle = query.to_lowercase();
    messages
        .iter()
        .filter(|m| !m.is_placeholder() && m.content.to_lowercase().contains(&needle))
        .collect()
}

/// The response answered right after the bot message `message_id`, if the
/// next message is the user's and matches a recorded answer.
pub fn response_for_message<'a>(
    messages: &[ConversationMessage],
    responses: &'a [UserResponse],
    message_id: &str,
) -> Option<(usize, &'a UserResponse)> {
    let pos = messages.iter().position(|m| m.id == message_id)?;
    let next = messages.get(pos + 1).filter(|m| m.role == MessageRole::User)?;
    responses.iter().enumerate().find(|(_, r)| r.answer == next.content)
}
