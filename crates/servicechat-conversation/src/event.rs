use servicechat_catalog::locations::Coordinates;
use servicechat_core::models::conversation::ConversationKey;
use servicechat_core::models::message::ConversationMessage;
use servicechat_transport::error::TransportError;

use crate::state::RequestTicket;

/// Result of a chat request as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply(String),
    /// The error text, for logging only; the user sees fixed wording.
    Failed(String),
}

impl From<Result<String, TransportError>> for ChatOutcome {
    fn from(result: Result<String, TransportError>) -> Self {
        match result {
            Ok(reply) => Self::Reply(reply),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Select a scenario, or a custom conversation when `None`.
    Open { scenario_id: Option<String> },
    LogLoaded {
        key: ConversationKey,
        messages: Vec<ConversationMessage>,
    },
    InputChanged { text: String },
    KeyPressed { key: Key, shift: bool },
    Submit,
    ReplyReceived {
        ticket: RequestTicket,
        outcome: ChatOutcome,
    },
    Reset,
    ShowChat,
    ShowRoadmap,
    ShowHistory,
    Back,
    EditResponse { index: usize, answer: String },
    Troubleshoot,
    ToggleStep { step_id: String },
    OpenForm { step_id: String },
    OpenLocations {
        step_id: String,
        origin: Option<Coordinates>,
    },
    /// Set a field on the open form or the birth-registration wizard.
    SetField { field: String, value: String },
    SubmitForm,
    FixIssues,
    /// Ask the assistant about the birth-registration form.
    AskForm { question: String },
}
