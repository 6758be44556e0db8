//! The conversation state machine.
//!
//! [`Controller::handle`] applies one [`Event`] to the owned
//! [`ConversationState`] and returns the [`Effect`]s the driver must run. It
//! performs no I/O and reads no clock; `now` is passed in.
//!
//! At most one chat request is in flight per conversation, tracked by a
//! [`RequestTicket`]. Opening a conversation or resetting it bumps the
//! generation, so a reply that arrives afterwards is dropped instead of
//! landing in the new log.

use jiff::Timestamp;
use servicechat_catalog::get_scenario;
use servicechat_core::models::conversation::{ConversationKey, ConversationScope};
use servicechat_core::models::message::{ConversationMessage, sequenced_id};
use servicechat_core::models::response::{UserResponse, edit_answer};
use servicechat_core::models::scenario::CUSTOM_SCOPE;
use servicechat_transport::chat::{INIT_FAILURE_REPLY, REPLY_FAILURE_REPLY};
use servicechat_transport::prompts;
use tracing::debug;

use crate::birth_registration::BirthRegistration;
use crate::effect::Effect;
use crate::error::ConversationError;
use crate::event::{ChatOutcome, Event, Key};
use crate::state::{ConversationState, Phase, RequestPurpose, RequestTicket, View};
use crate::views::form::FormAssistance;
use crate::views::locations::LocationFinder;
use crate::views::roadmap::Roadmap;

pub const WELCOME_ID: &str = "welcome";
pub const INIT_ERROR_ID: &str = "init-error";

pub const UPDATE_NOTICE: &str = "I've updated your response. This may affect your roadmap. Would you like me to regenerate it?";

pub const TROUBLESHOOT_PROMPT: &str =
    "I'm here to help troubleshoot any issues you're experiencing. What specific problem are you facing?";

pub struct Controller {
    state: ConversationState,
    next_ticket: u64,
    next_seq: u64,
}

impl Controller {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            state: ConversationState::new(session_id),
            next_ticket: 0,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn handle(&mut self, event: Event, now: Timestamp) -> Result<Vec<Effect>, ConversationError> {
        let before = self.state.phase;
        let effects = match event {
            Event::Open { scenario_id } => self.open(scenario_id.as_deref())?,
            Event::LogLoaded { key, messages } => self.log_loaded(key, messages, now),
            Event::InputChanged { text } => {
                self.state.input = text;
                Vec::new()
            }
            Event::KeyPressed { key, shift } => self.key_pressed(key, shift, now),
            Event::Submit => self.submit(now),
            Event::ReplyReceived { ticket, outcome } => self.reply_received(ticket, outcome, now),
            Event::Reset => self.reset(),
            Event::ShowChat => {
                self.require_open()?;
                self.state.view = View::Chat;
                Vec::new()
            }
            Event::ShowRoadmap => {
                self.require_open()?;
                self.state.view = View::Roadmap;
                Vec::new()
            }
            Event::ShowHistory => {
                if self.state.history_available() {
                    self.state.view = View::History;
                }
                Vec::new()
            }
            Event::Back => {
                self.back();
                Vec::new()
            }
            Event::EditResponse { index, answer } => self.edit_response(index, &answer, now)?,
            Event::Troubleshoot => self.troubleshoot(now)?,
            Event::ToggleStep { step_id } => {
                self.state.roadmap.toggle(&step_id)?;
                Vec::new()
            }
            Event::OpenForm { step_id } => {
                let step = self
                    .state
                    .roadmap
                    .step(&step_id)
                    .ok_or_else(|| ConversationError::UnknownStep(step_id.clone()))?;
                self.state.form = Some(FormAssistance::open(step, &self.state.responses)?);
                self.state.view = View::Form;
                Vec::new()
            }
            Event::OpenLocations { step_id, origin } => {
                let step = self
                    .state
                    .roadmap
                    .step(&step_id)
                    .ok_or_else(|| ConversationError::UnknownStep(step_id.clone()))?;
                let kind = step.location.ok_or_else(|| ConversationError::NoLocation(step_id.clone()))?;
                self.state.locations = Some(LocationFinder::new(kind, origin));
                self.state.view = View::Locations;
                Vec::new()
            }
            Event::SetField { field, value } => {
                self.with_active_form(|form| form.set(&field, &value), |birth| birth.set(&field, &value))?;
                Vec::new()
            }
            Event::SubmitForm => {
                self.with_active_form(|form| form.submit().map(|_| ()), |birth| birth.submit().map(|_| ()))?;
                Vec::new()
            }
            Event::FixIssues => {
                self.with_active_form(
                    |form| {
                        form.fix_issues();
                        Ok(())
                    },
                    |birth| {
                        birth.fix_issues();
                        Ok(())
                    },
                )?;
                Vec::new()
            }
            Event::AskForm { question } => self.ask_form(&question)?,
        };

        if self.state.phase != before {
            debug!(from = ?before, to = ?self.state.phase, generation = self.state.generation, "conversation phase changed");
        }
        Ok(effects)
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    fn open(&mut self, scenario_id: Option<&str>) -> Result<Vec<Effect>, ConversationError> {
        let scenario = match scenario_id {
            None | Some(CUSTOM_SCOPE) => None,
            Some(id) => Some(
                get_scenario(id)
                    .ok_or_else(|| ConversationError::UnknownScenario(id.to_string()))?
                    .to_scenario(),
            ),
        };

        let session_id = std::mem::take(&mut self.state.session_id);
        let generation = self.state.generation + 1;
        let scope = ConversationScope::from_scenario_id(scenario.as_ref().map(|s| s.id.as_str()));
        let key = ConversationKey::new(session_id.clone(), scope);

        let mut state = ConversationState::new(session_id);
        state.generation = generation;
        state.roadmap = Roadmap::for_scenario(scenario.as_ref().map(|s| s.id.as_str()));
        state.birth = scenario
            .as_ref()
            .filter(|s| s.is_birth_registration())
            .map(|_| BirthRegistration::new());
        state.scenario = scenario;
        state.key = Some(key.clone());
        state.view = state.home_view();
        self.state = state;

        tracing::info!(key = %key, generation, "conversation opened");
        Ok(vec![Effect::LoadLog { key }])
    }

    fn log_loaded(&mut self, key: ConversationKey, mut messages: Vec<ConversationMessage>, now: Timestamp) -> Vec<Effect> {
        if self.state.key.as_ref() != Some(&key) || self.state.phase != Phase::Uninitialized {
            debug!(key = %key, "ignoring log for a conversation that is no longer loading");
            return Vec::new();
        }
        messages.retain(|m| !m.is_placeholder());
        if messages.is_empty() {
            return self.begin_initialization(now);
        }
        debug!(key = %key, count = messages.len(), "resuming persisted conversation");
        self.state.messages = messages;
        self.state.phase = Phase::Idle;
        Vec::new()
    }

    fn begin_initialization(&mut self, now: Timestamp) -> Vec<Effect> {
        let id = self.next_id("bot-connecting", now);
        self.state.messages.push(ConversationMessage::placeholder(id, now));
        self.state.phase = Phase::Initializing;

        let message = match self.state.scenario_title() {
            Some(title) => prompts::scenario_greeting(title),
            None => prompts::custom_greeting(),
        };
        let ticket = self.issue(RequestPurpose::Greeting);
        self.state.pending = Some(ticket);
        vec![self.send_chat(ticket, message)]
    }

    fn reset(&mut self) -> Vec<Effect> {
        if self.state.key.is_none() || matches!(self.state.phase, Phase::Uninitialized | Phase::Resetting) {
            return Vec::new();
        }
        self.state.generation += 1;
        self.state.messages.retain(|m| !m.is_placeholder());
        self.state.phase = Phase::Resetting;
        self.state.view = self.state.home_view();

        let notice = prompts::reset_notice(self.state.scenario_title());
        let ticket = self.issue(RequestPurpose::ResetNotice);
        self.state.pending = Some(ticket);
        vec![self.send_chat(ticket, notice)]
    }

    fn finish_reset(&mut self, now: Timestamp) -> Vec<Effect> {
        let Some(key) = self.state.key.clone() else {
            return Vec::new();
        };
        self.state.messages.clear();
        self.state.responses.clear();
        self.state.input.clear();
        self.state.troubleshooting = false;
        self.state.form = None;
        self.state.locations = None;
        self.state.pending = None;
        tracing::info!(key = %key, "conversation reset");

        let mut effects = vec![Effect::ClearLog { key }];
        effects.extend(self.begin_initialization(now));
        effects
    }

    // ── Chat ─────────────────────────────────────────────────────────────────

    fn key_pressed(&mut self, key: Key, shift: bool, now: Timestamp) -> Vec<Effect> {
        match key {
            Key::Enter if shift => {
                self.state.input.push('\n');
                Vec::new()
            }
            Key::Enter => self.submit(now),
            Key::Backspace => {
                self.state.input.pop();
                Vec::new()
            }
            Key::Char(c) => {
                self.state.input.push(c);
                Vec::new()
            }
        }
    }

    fn submit(&mut self, now: Timestamp) -> Vec<Effect> {
        if !self.state.can_send() {
            return Vec::new();
        }
        let text = std::mem::take(&mut self.state.input);

        let question = self
            .state
            .last_bot_message()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.state.responses.push(UserResponse {
            question_index: self.state.responses.len(),
            question,
            answer: text.clone(),
        });

        let user_id = self.next_id("user", now);
        self.state.messages.push(ConversationMessage::user(user_id, text.clone(), now));
        let thinking_id = self.next_id("bot-thinking", now);
        self.state.messages.push(ConversationMessage::placeholder(thinking_id, now));
        self.state.phase = Phase::AwaitingReply;

        let ticket = self.issue(RequestPurpose::Reply);
        self.state.pending = Some(ticket);
        let mut effects: Vec<Effect> = self.save().into_iter().collect();
        effects.push(self.send_chat(ticket, text));
        effects
    }

    fn reply_received(&mut self, ticket: RequestTicket, outcome: ChatOutcome, now: Timestamp) -> Vec<Effect> {
        if ticket.purpose == RequestPurpose::FormQuestion {
            if self.state.form_pending != Some(ticket) {
                debug!(ticket = ticket.id, "discarding stale form answer");
                return Vec::new();
            }
            self.state.form_pending = None;
            if let Some(birth) = self.state.birth.as_mut() {
                birth.receive_answer(outcome);
            }
            return Vec::new();
        }

        if ticket.generation != self.state.generation || self.state.pending != Some(ticket) {
            debug!(
                ticket = ticket.id,
                ticket_generation = ticket.generation,
                generation = self.state.generation,
                "discarding stale reply"
            );
            return Vec::new();
        }
        self.state.pending = None;

        if let ChatOutcome::Failed(error) = &outcome {
            tracing::warn!(purpose = ?ticket.purpose, %error, "chat request failed");
        }

        match ticket.purpose {
            RequestPurpose::Greeting => {
                let message = match outcome {
                    ChatOutcome::Reply(text) => ConversationMessage::bot(WELCOME_ID, text, now),
                    ChatOutcome::Failed(_) => ConversationMessage::bot(INIT_ERROR_ID, INIT_FAILURE_REPLY, now),
                };
                self.settle(message);
                self.save().into_iter().collect()
            }
            RequestPurpose::Reply => {
                let message = match outcome {
                    ChatOutcome::Reply(text) => ConversationMessage::bot(self.next_id("bot", now), text, now),
                    ChatOutcome::Failed(_) => {
                        ConversationMessage::bot(self.next_id("bot-error", now), REPLY_FAILURE_REPLY, now)
                    }
                };
                self.settle(message);
                self.save().into_iter().collect()
            }
            // The notice is best effort; the reset goes ahead either way.
            RequestPurpose::ResetNotice => self.finish_reset(now),
            RequestPurpose::FormQuestion => Vec::new(),
        }
    }

    /// Replace the placeholder with `message` and return to idle.
    fn settle(&mut self, message: ConversationMessage) {
        self.state.messages.retain(|m| !m.is_placeholder());
        self.state.messages.push(message);
        self.state.phase = Phase::Idle;
    }

    // ── Views ────────────────────────────────────────────────────────────────

    fn back(&mut self) {
        self.state.view = match self.state.view {
            View::Form | View::Locations => View::Roadmap,
            View::Roadmap | View::History | View::Chat | View::BirthRegistration => self.state.home_view(),
        };
    }

    fn edit_response(&mut self, index: usize, answer: &str, now: Timestamp) -> Result<Vec<Effect>, ConversationError> {
        if self.state.view != View::History {
            return Err(ConversationError::WrongView);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ConversationError::EmptyAnswer);
        }
        edit_answer(&mut self.state.responses, index, answer)?;
        let id = self.next_id("update", now);
        self.state.messages.push(ConversationMessage::bot(id, UPDATE_NOTICE, now));
        Ok(self.save().into_iter().collect())
    }

    fn troubleshoot(&mut self, now: Timestamp) -> Result<Vec<Effect>, ConversationError> {
        self.require_open()?;
        let id = self.next_id("troubleshoot", now);
        self.state.messages.push(ConversationMessage::bot(id, TROUBLESHOOT_PROMPT, now));
        self.state.troubleshooting = true;
        self.state.view = View::Chat;
        Ok(self.save().into_iter().collect())
    }

    fn with_active_form(
        &mut self,
        on_form: impl FnOnce(&mut FormAssistance) -> Result<(), ConversationError>,
        on_birth: impl FnOnce(&mut BirthRegistration) -> Result<(), ConversationError>,
    ) -> Result<(), ConversationError> {
        match self.state.view {
            View::Form => self.state.form.as_mut().map_or(Err(ConversationError::WrongView), on_form),
            View::BirthRegistration => self.state.birth.as_mut().map_or(Err(ConversationError::WrongView), on_birth),
            _ => Err(ConversationError::WrongView),
        }
    }

    fn ask_form(&mut self, question: &str) -> Result<Vec<Effect>, ConversationError> {
        let birth = self.state.birth.as_mut().ok_or(ConversationError::WrongView)?;
        let prompt = birth.ask(question)?;
        let ticket = self.issue(RequestPurpose::FormQuestion);
        self.state.form_pending = Some(ticket);
        Ok(vec![self.send_chat(ticket, prompt)])
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn require_open(&self) -> Result<(), ConversationError> {
        if self.state.key.is_some() { Ok(()) } else { Err(ConversationError::NotOpen) }
    }

    fn issue(&mut self, purpose: RequestPurpose) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket {
            id: self.next_ticket,
            generation: self.state.generation,
            purpose,
        }
    }

    fn next_id(&mut self, prefix: &str, now: Timestamp) -> String {
        self.next_seq += 1;
        sequenced_id(prefix, now, self.next_seq)
    }

    fn send_chat(&self, ticket: RequestTicket, message: String) -> Effect {
        Effect::SendChat {
            ticket,
            message,
            scenario_id: self.state.scenario_id().map(str::to_string),
        }
    }

    /// Persist the current log. Nothing to do while only a placeholder shows.
    fn save(&self) -> Option<Effect> {
        let key = self.state.key.clone()?;
        if self.state.messages.iter().all(|m| m.is_placeholder()) {
            return None;
        }
        Some(Effect::SaveLog {
            key,
            messages: self.state.messages.clone(),
        })
    }
}
