//! servicechat-conversation
//!
//! The conversation controller and everything it drives.
//!
//! - `controller` — pure state machine: `(state, event) -> effects`
//! - `driver` — runs effects against a store and a chat transport
//! - `guided` — scripted question flow for offline use
//! - `views` — roadmap, form assistance, location finder and history models
//! - `birth_registration` — the wizard shown for the `new-baby` scenario

pub mod birth_registration;
pub mod controller;
pub mod driver;
pub mod effect;
pub mod error;
pub mod event;
pub mod guided;
pub mod state;
pub mod views;

pub use crate::controller::Controller;
pub use crate::driver::SyncDriver;
pub use crate::effect::Effect;
pub use crate::error::ConversationError;
pub use crate::event::{ChatOutcome, Event, Key};
pub use crate::state::{ConversationState, Phase, RequestPurpose, RequestTicket, View};
