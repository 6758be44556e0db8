use servicechat_core::storage_keys;

use crate::kv::KeyValueStore;

/// Return the stored session id, creating and storing a new v4 UUID on
/// first use.
///
/// Never fails: an unreadable store yields a fresh id each call, and a
/// failed write still returns the fresh id.
pub fn get_or_create_id(kv: &dyn KeyValueStore) -> String {
    match kv.get(storage_keys::USER_ID) {
        Ok(Some(id)) if !id.trim().is_empty() => return id,
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "session id unreadable, using a fresh one");
            return uuid::Uuid::new_v4().to_string();
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    match kv.set(storage_keys::USER_ID, &id) {
        Ok(()) => tracing::info!(session_id = %id, "created session id"),
        Err(e) => tracing::warn!(error = %e, "failed to persist session id"),
    }
    id
}
