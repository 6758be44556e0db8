use std::fmt;

use serde::{Deserialize, Serialize};

use super::scenario::CUSTOM_SCOPE;
use crate::storage_keys;

/// Which conversation a log belongs to within one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ConversationScope {
    Scenario(String),
    Custom,
}

impl ConversationScope {
    pub fn from_scenario_id(id: Option<&str>) -> Self {
        match id {
            Some(id) => Self::Scenario(id.to_string()),
            None => Self::Custom,
        }
    }

    /// The scenario id sent to the chat endpoint, if any.
    pub fn scenario_id(&self) -> Option<&str> {
        match self {
            Self::Scenario(id) => Some(id),
            Self::Custom => None,
        }
    }

    /// The key segment: the scenario id, or `custom`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scenario(id) => id,
            Self::Custom => CUSTOM_SCOPE,
        }
    }
}

/// Composite identity of a persisted conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub session_id: String,
    pub scope: ConversationScope,
}

impl ConversationKey {
    pub fn new(session_id: impl Into<String>, scope: ConversationScope) -> Self {
        Self {
            session_id: session_id.into(),
            scope,
        }
    }

    /// The storage key for this log.
    pub fn storage_key(&self) -> String {
        storage_keys::chat_history(&self.session_id, self.scope.as_str())
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
