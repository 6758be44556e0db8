//! servicechat-cli
//!
//! Terminal front end for ServiceChat.
//!
//! - `config` — versioned config file and flag/environment layering
//! - `commands` — REPL line parsing
//! - `shell` — live session over the conversation controller
//! - `offline` — guided question flow when no endpoint is configured
//! - `render` — plain-text views
//! - `logging` — subscriber setup with a reloadable filter
//! - `startup` — catalog check and settings resolution

pub mod commands;
pub mod config;
pub mod logging;
pub mod offline;
pub mod render;
pub mod shell;
pub mod startup;
