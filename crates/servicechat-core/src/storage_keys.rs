//! Key-value store key conventions.
//!
//! Pure string functions. These define the canonical layout of entries in
//! the local store, matching the browser storage layout of earlier clients.

/// Key holding the per-profile session identifier.
pub const USER_ID: &str = "userId";

pub const CHAT_HISTORY_PREFIX: &str = "chatHistory-";

/// `chatHistory-{userId}-{scenarioIdOrCustom}`
pub fn chat_history(session_id: &str, scope: &str) -> String {
    format!("{CHAT_HISTORY_PREFIX}{session_id}-{scope}")
}
