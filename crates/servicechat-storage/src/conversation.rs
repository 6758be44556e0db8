//! Persisted conversation logs.
//!
//! Every failure here degrades: a log that cannot be read is treated as
//! absent, and a log that cannot be written stays in memory only.

use std::sync::Arc;

use servicechat_core::models::conversation::ConversationKey;
use servicechat_core::models::message::ConversationMessage;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

#[derive(Clone)]
pub struct ConversationStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ConversationStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the log for `key`. Absent, unreadable or malformed entries
    /// yield an empty list.
    pub fn load(&self, key: &ConversationKey) -> Vec<ConversationMessage> {
        match self.try_load(key) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to load conversation log, starting empty");
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load) but surfaces the failure.
    pub fn try_load(&self, key: &ConversationKey) -> Result<Vec<ConversationMessage>, StorageError> {
        let Some(raw) = self.kv.get(&key.storage_key())? else {
            return Ok(Vec::new());
        };
        let messages: Vec<ConversationMessage> = serde_json::from_str(&raw)?;
        tracing::debug!(key = %key, count = messages.len(), "conversation log loaded");
        Ok(messages)
    }

    /// Overwrite the log for `key`. Placeholders are dropped before writing;
    /// if nothing remains the entry is left untouched.
    pub fn save(&self, key: &ConversationKey, messages: &[ConversationMessage]) {
        if let Err(e) = self.try_save(key, messages) {
            tracing::warn!(key = %key, error = %e, "failed to save conversation log");
        }
    }

    pub fn try_save(&self, key: &ConversationKey, messages: &[ConversationMessage]) -> Result<(), StorageError> {
        let settled: Vec<&ConversationMessage> = messages.iter().filter(|m| !m.is_placeholder()).collect();
        if settled.is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string(&settled)?;
        self.kv.set(&key.storage_key(), &json)?;
        tracing::debug!(key = %key, count = settled.len(), "conversation log saved");
        Ok(())
    }

    pub fn clear(&self, key: &ConversationKey) {
        match self.kv.remove(&key.storage_key()) {
            Ok(()) => tracing::info!(key = %key, "conversation log cleared"),
            Err(e) => tracing::warn!(key = %key, error = %e, "failed to clear conversation log"),
        }
    }
}
