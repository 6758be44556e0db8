use serde::{Deserialize, Serialize};

/// Id substrings that mark a transient placeholder message.
pub const PLACEHOLDER_MARKERS: [&str; 2] = ["thinking", "connecting"];

/// Content shown while a placeholder is on screen.
pub const PLACEHOLDER_CONTENT: &str = "...";

/// A single entry in a conversation transcript.
///
/// Ordering is append-only by arrival. Messages whose `id` contains one of
/// [`PLACEHOLDER_MARKERS`] are transient and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: jiff::Timestamp,
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Bot,
    User,
}

impl ConversationMessage {
    pub fn bot(id: impl Into<String>, content: impl Into<String>, timestamp: jiff::Timestamp) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Bot,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(id: impl Into<String>, content: impl Into<String>, timestamp: jiff::Timestamp) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::User,
            content: content.into(),
            timestamp,
        }
    }

    /// A bot placeholder rendered as a spinner until the real reply arrives.
    pub fn placeholder(id: impl Into<String>, timestamp: jiff::Timestamp) -> Self {
        Self::bot(id, PLACEHOLDER_CONTENT, timestamp)
    }

    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER_MARKERS.iter().any(|m| self.id.contains(m))
    }
}

/// Build a message id of the form `{prefix}-{millis}-{seq}`.
///
/// The millisecond component keeps ids distinct across sessions that reload
/// the same log; `seq` keeps them distinct within one millisecond.
pub fn sequenced_id(prefix: &str, at: jiff::Timestamp, seq: u64) -> String {
    format!("{prefix}-{}-{seq}", at.as_millisecond())
}

/// Count the placeholders in a transcript.
pub fn placeholder_count(messages: &[ConversationMessage]) -> usize {
    messages.iter().filter(|m| m.is_placeholder()).count()
}
