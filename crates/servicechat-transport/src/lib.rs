//! servicechat-transport
//!
//! Talking to the remote chat endpoint. One request, one reply, no retries.
//! Also holds the prompt text the client synthesizes on the user's behalf.

pub mod chat;
pub mod error;
pub mod prompts;
