//! Effect execution.
//!
//! [`SyncDriver`] runs every effect inline, chat requests included, and feeds
//! results back until the controller is quiet. Front ends that need input to
//! keep flowing while a request is in flight use [`execute_local`] for the
//! storage effects and run [`execute_chat`] on a worker.

use std::collections::VecDeque;
use std::sync::Arc;

use jiff::Timestamp;
use servicechat_storage::conversation::ConversationStore;
use servicechat_transport::chat::ChatTransport;

use crate::controller::Controller;
use crate::effect::Effect;
use crate::error::ConversationError;
use crate::event::{ChatOutcome, Event};
use crate::state::{ConversationState, RequestTicket};

/// A chat request the caller must send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatJob {
    pub ticket: RequestTicket,
    pub message: String,
    pub scenario_id: Option<String>,
}

/// What running an effect locally produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    Done,
    /// Feed this back into the controller.
    Event(Event),
    /// A network call; run it with [`execute_chat`].
    Chat(ChatJob),
}

/// Run a storage effect against `store`. Chat effects are handed back.
pub fn execute_local(store: &ConversationStore, effect: Effect) -> Execution {
    match effect {
        Effect::LoadLog { key } => {
            let messages = store.load(&key);
            Execution::Event(Event::LogLoaded { key, messages })
        }
        Effect::SaveLog { key, messages } => {
            store.save(&key, &messages);
            Execution::Done
        }
        Effect::ClearLog { key } => {
            store.clear(&key);
            Execution::Done
        }
        Effect::SendChat {
            ticket,
            message,
            scenario_id,
        } => Execution::Chat(ChatJob {
            ticket,
            message,
            scenario_id,
        }),
    }
}

/// Send one chat request and wrap the result as an event.
pub fn execute_chat(transport: &dyn ChatTransport, session_id: &str, job: ChatJob) -> Event {
    let result = transport.send(&job.message, job.scenario_id.as_deref(), session_id);
    Event::ReplyReceived {
        ticket: job.ticket,
        outcome: ChatOutcome::from(result),
    }
}

/// Drives a [`Controller`] with blocking I/O.
pub struct SyncDriver {
    controller: Controller,
    store: ConversationStore,
    transport: Arc<dyn ChatTransport>,
}

impl SyncDriver {
    pub fn new(session_id: impl Into<String>, store: ConversationStore, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            controller: Controller::new(session_id),
            store,
            transport,
        }
    }

    pub fn state(&self) -> &ConversationState {
        self.controller.state()
    }

    /// Apply `event` and every follow-up event until no effects remain.
    pub fn dispatch(&mut self, event: Event, now: Timestamp) -> Result<(), ConversationError> {
        let mut queue: VecDeque<Effect> = self.controller.handle(event, now)?.into();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match execute_local(&self.store, effect) {
                Execution::Done => continue,
                Execution::Event(event) => event,
                Execution::Chat(job) => {
                    let session_id = self.controller.state().session_id.clone();
                    execute_chat(self.transport.as_ref(), &session_id, job)
                }
            };
            queue.extend(self.controller.handle(follow_up, now)?);
        }
        Ok(())
    }
}
