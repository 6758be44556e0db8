//! View models for the screens reachable from a conversation.

pub mod form;
pub mod history;
pub mod locations;
pub mod roadmap;
