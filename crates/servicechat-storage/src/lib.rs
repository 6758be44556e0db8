//! servicechat-storage
//!
//! Local persistence. A small key-value store abstraction with in-memory and
//! file-backed implementations, plus the conversation log store and the
//! session identity built on top of it.

pub mod conversation;
pub mod error;
pub mod identity;
pub mod kv;
