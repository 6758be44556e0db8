use servicechat_core::models::conversation::ConversationKey;
use servicechat_core::models::message::ConversationMessage;

use crate::state::RequestTicket;

/// Work the controller asks its driver to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the persisted log; answer with [`Event::LogLoaded`](crate::event::Event::LogLoaded).
    LoadLog { key: ConversationKey },
    /// Overwrite the persisted log.
    SaveLog {
        key: ConversationKey,
        messages: Vec<ConversationMessage>,
    },
    ClearLog { key: ConversationKey },
    /// Send one chat request; answer with
    /// [`Event::ReplyReceived`](crate::event::Event::ReplyReceived) carrying `ticket`.
    SendChat {
        ticket: RequestTicket,
        message: String,
        scenario_id: Option<String>,
    },
}
