//! The live REPL session: commands in, controller events out, rendered text
//! back. Chat requests are returned as jobs for the caller to run so the
//! prompt stays responsive while a reply is in flight.

use std::collections::VecDeque;

use jiff::Timestamp;
use jiff::civil::Weekday;
use servicechat_catalog::scenario_catalog;
use servicechat_conversation::driver::{ChatJob, Execution, execute_local};
use servicechat_conversation::{Controller, ConversationError, ConversationState, Event, Key, Phase, View};
use servicechat_storage::conversation::ConversationStore;

use crate::commands::{Command, HELP};
use crate::render;

/// Shown when a line is typed while a reply is outstanding. The line is not
/// kept.
pub const STILL_WAITING: &str = "Still waiting for the assistant. Send that again once it replies.";

/// What one command or reply produced.
#[derive(Debug, Default)]
pub struct Step {
    /// Text to print; empty for nothing.
    pub output: String,
    pub jobs: Vec<ChatJob>,
    pub quit: bool,
}

impl Step {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }
}

pub struct Shell {
    controller: Controller,
    store: ConversationStore,
    /// Settled messages already printed for `shown_generation`.
    printed: usize,
    shown_generation: Option<u64>,
    location_query: String,
    history_query: Option<String>,
}

impl Shell {
    pub fn new(session_id: impl Into<String>, store: ConversationStore) -> Self {
        Self {
            controller: Controller::new(session_id),
            store,
            printed: 0,
            shown_generation: None,
            location_query: String::new(),
            history_query: None,
        }
    }

    pub fn state(&self) -> &ConversationState {
        self.controller.state()
    }

    pub fn session_id(&self) -> &str {
        &self.state().session_id
    }

    pub fn apply(&mut self, command: Command, now: Timestamp) -> Step {
        let (events, show_view) = match command {
            Command::Help => return Step::text(HELP),
            Command::Quit => {
                return Step {
                    quit: true,
                    ..Step::default()
                };
            }
            Command::Scenarios => return Step::text(render::scenarios(&scenario_catalog())),
            Command::Find(query) => {
                if self.state().view != View::Locations {
                    return Step::text("Open an office list with /locations first.");
                }
                self.location_query = query;
                return Step::text(self.render_view(weekday(now)));
            }
            Command::History(query) => {
                self.history_query = query;
                let mut step = self.apply_events(vec![Event::ShowHistory], true, now);
                if self.state().view != View::History {
                    step.output = "History is available once the conversation has more than one message.".to_string();
                }
                return step;
            }
            Command::Open(scenario_id) => (vec![Event::Open { scenario_id }], true),
            Command::Reset => (vec![Event::Reset], false),
            Command::Roadmap => (vec![Event::ShowRoadmap], true),
            Command::Edit { index, answer } => (vec![Event::EditResponse { index, answer }], false),
            Command::Back => (vec![Event::Back], true),
            Command::Troubleshoot => (vec![Event::Troubleshoot], false),
            Command::Toggle(step_id) => (vec![Event::ToggleStep { step_id }], true),
            Command::Form(step_id) => (vec![Event::OpenForm { step_id }], true),
            Command::Locations { step_id, origin } => {
                self.location_query.clear();
                (vec![Event::OpenLocations { step_id, origin }], true)
            }
            Command::Field { name, value } => (vec![Event::SetField { field: name, value }], true),
            Command::Ask(question) => (vec![Event::AskForm { question }], true),
            Command::Submit => (vec![Event::SubmitForm], true),
            Command::Fix => (vec![Event::FixIssues], true),
            Command::Chat(_) | Command::Continue(_) if self.state().is_busy() => {
                return Step::text(STILL_WAITING);
            }
            Command::Chat(text) => (self.typed(text, false), false),
            Command::Continue(text) => (self.typed(text, true), false),
        };

        self.apply_events(events, show_view, now)
    }

    fn apply_events(&mut self, events: Vec<Event>, show_view: bool, now: Timestamp) -> Step {
        let mut step = match self.run(events, now) {
            Ok(step) => step,
            Err(e) => return Step::text(format!("! {e}")),
        };
        if show_view {
            append(&mut step.output, &self.render_view(weekday(now)));
        }
        step
    }

    /// Feed a chat reply back in.
    pub fn deliver(&mut self, event: Event, now: Timestamp) -> Step {
        let birth_answer = matches!(
            &event,
            Event::ReplyReceived { ticket, .. } if Some(*ticket) == self.state().form_pending
        );
        let mut step = match self.run(vec![event], now) {
            Ok(step) => step,
            Err(e) => return Step::text(format!("! {e}")),
        };
        if birth_answer && let Some(m) = self.state().birth.as_ref().and_then(|b| b.panel().last()) {
            append(&mut step.output, &format!("form help> {}", m.content));
        }
        step
    }

    /// Draft text typed as keys: the line, then Enter (Shift+Enter to keep
    /// composing).
    fn typed(&self, text: String, shift: bool) -> Vec<Event> {
        let mut draft = self.state().input.clone();
        draft.push_str(&text);
        vec![
            Event::InputChanged { text: draft },
            Event::KeyPressed { key: Key::Enter, shift },
        ]
    }

    fn run(&mut self, events: Vec<Event>, now: Timestamp) -> Result<Step, ConversationError> {
        let mut step = Step::default();
        for event in events {
            step.jobs.extend(self.dispatch(event, now)?);
        }
        step.output = self.transcript();
        Ok(step)
    }

    /// Apply `event` and run storage effects inline; chat effects are
    /// returned.
    fn dispatch(&mut self, event: Event, now: Timestamp) -> Result<Vec<ChatJob>, ConversationError> {
        let mut jobs = Vec::new();
        let mut queue: VecDeque<_> = self.controller.handle(event, now)?.into();
        while let Some(effect) = queue.pop_front() {
            match execute_local(&self.store, effect) {
                Execution::Done => {}
                Execution::Event(follow_up) => queue.extend(self.controller.handle(follow_up, now)?),
                Execution::Chat(job) => jobs.push(job),
            }
        }
        Ok(jobs)
    }

    /// Settled messages not printed yet, plus a status line while waiting.
    fn transcript(&mut self) -> String {
        let state = self.controller.state();
        if state.phase == Phase::Resetting {
            return "Clearing this conversation...".to_string();
        }

        let mut out = Vec::new();
        if self.shown_generation != Some(state.generation) {
            self.shown_generation = Some(state.generation);
            self.printed = 0;
            let title = state.scenario_title().unwrap_or("Custom conversation");
            out.push(format!("── {title} ──"));
        }
        let settled: Vec<_> = state.messages.iter().filter(|m| !m.is_placeholder()).collect();
        for m in settled.iter().skip(self.printed) {
            out.push(render::message(m));
        }
        self.printed = settled.len();

        match state.phase {
            Phase::Initializing => out.push("(connecting to the assistant...)".to_string()),
            Phase::AwaitingReply => out.push("(assistant is typing...)".to_string()),
            _ if !state.input.is_empty() => out.push(format!("(draft) {}", state.input)),
            _ => {}
        }
        out.join("\n")
    }

    fn render_view(&self, today: Weekday) -> String {
        let state = self.state();
        match state.view {
            View::Chat => String::new(),
            View::Roadmap => render::roadmap(&state.roadmap),
            View::History => render::history(&state.messages, &state.responses, self.history_query.as_deref()),
            View::Form => state.form.as_ref().map(render::form).unwrap_or_default(),
            View::Locations => state
                .locations
                .as_ref()
                .map(|finder| render::locations(&finder.search(&self.location_query), today))
                .unwrap_or_default(),
            View::BirthRegistration => state.birth.as_ref().map(render::birth).unwrap_or_default(),
        }
    }
}

fn append(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(text);
}

pub(crate) fn weekday(now: Timestamp) -> Weekday {
    now.to_zoned(jiff::tz::TimeZone::system()).weekday()
}
