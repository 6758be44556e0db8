use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An answer the user gave to a question during a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub question_index: usize,
    pub question: String,
    pub answer: String,
}

/// Replace the answer at `index` in place.
///
/// `question_index` and `question` are never touched, and no other entry
/// changes.
pub fn edit_answer(
    responses: &mut [UserResponse],
    index: usize,
    answer: impl Into<String>,
) -> Result<(), CoreError> {
    let len = responses.len();
    let entry = responses
        .get_mut(index)
        .ok_or(CoreError::ResponseIndex { index, len })?;
    entry.answer = answer.into();
    Ok(())
}

/// Look up an answer by case-insensitive question text.
pub fn answer_for<'a>(responses: &'a [UserResponse], question: &str) -> Option<&'a str> {
    let wanted = question.to_lowercase();
    // Later answers to the same question win.
    responses
        .iter()
        .rev()
        .find(|r| r.question.to_lowercase() == wanted)
        .map(|r| r.answer.as_str())
}
