use servicechat_core::models::conversation::ConversationKey;
use servicechat_core::models::message::{ConversationMessage, MessageRole, placeholder_count};
use servicechat_core::models::response::UserResponse;
use servicechat_core::models::scenario::Scenario;

use crate::birth_registration::BirthRegistration;
use crate::views::form::FormAssistance;
use crate::views::locations::LocationFinder;
use crate::views::roadmap::Roadmap;

/// Where the conversation is in its request/reply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing open yet, or waiting for the persisted log.
    Uninitialized,
    /// Greeting requested; a "connecting" placeholder is showing.
    Initializing,
    Idle,
    /// User message sent; a "thinking" placeholder is showing.
    AwaitingReply,
    /// Reset notice sent; the log is cleared when it settles.
    Resetting,
}

/// The screen the user is looking at. Independent of [`Phase`]: a reply can
/// arrive while the roadmap is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    Roadmap,
    History,
    Form,
    Locations,
    BirthRegistration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    Greeting,
    Reply,
    ResetNotice,
    FormQuestion,
}

/// Identifies one outstanding chat request. A reply is applied only if its
/// ticket is still the one the state is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: u64,
    pub generation: u64,
    pub purpose: RequestPurpose,
}

#[derive(Debug, Clone)]
pub struct ConversationState {
    pub session_id: String,
    /// `None` for a custom conversation.
    pub scenario: Option<Scenario>,
    pub key: Option<ConversationKey>,
    pub phase: Phase,
    pub view: View,
    pub messages: Vec<ConversationMessage>,
    pub responses: Vec<UserResponse>,
    pub input: String,
    /// Bumped on open and reset; replies from older generations are dropped.
    pub generation: u64,
    /// The chat request in flight, if any.
    pub pending: Option<RequestTicket>,
    /// The birth-registration side-panel question in flight, if any.
    pub form_pending: Option<RequestTicket>,
    pub troubleshooting: bool,
    pub roadmap: Roadmap,
    pub form: Option<FormAssistance>,
    pub locations: Option<LocationFinder>,
    pub birth: Option<BirthRegistration>,
}

impl ConversationState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            scenario: None,
            key: None,
            phase: Phase::Uninitialized,
            view: View::Chat,
            messages: Vec::new(),
            responses: Vec::new(),
            input: String::new(),
            generation: 0,
            pending: None,
            form_pending: None,
            troubleshooting: false,
            roadmap: Roadmap::default(),
            form: None,
            locations: None,
            birth: None,
        }
    }

    pub fn scenario_id(&self) -> Option<&str> {
        self.scenario.as_ref().map(|s| s.id.as_str())
    }

    pub fn scenario_title(&self) -> Option<&str> {
        self.scenario.as_ref().map(|s| s.title.as_str())
    }

    /// A request is in flight and the send control is disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Initializing | Phase::AwaitingReply | Phase::Resetting)
    }

    pub fn can_send(&self) -> bool {
        self.phase == Phase::Idle && !self.input.trim().is_empty()
    }

    /// History is offered once there is more than the greeting.
    pub fn history_available(&self) -> bool {
        self.messages.len() > 1
    }

    /// The top-level view for the open scenario.
    pub fn home_view(&self) -> View {
        if self.birth.is_some() {
            View::BirthRegistration
        } else {
            View::Chat
        }
    }

    pub fn placeholder_count(&self) -> usize {
        placeholder_count(&self.messages)
    }

    /// The most recent settled bot message.
    pub fn last_bot_message(&self) -> Option<&ConversationMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Bot && !m.is_placeholder())
    }
}
