//! Scripted question flow used when no chat endpoint is available.
//!
//! A scenario conversation asks the scenario's questions in order and records
//! each answer; a custom conversation takes one free-form answer. Either way
//! the flow ends with a completion message and the roadmap becomes the next
//! step.

use jiff::Timestamp;
use servicechat_core::models::message::{ConversationMessage, sequenced_id};
use servicechat_core::models::response::{UserResponse, edit_answer};
use servicechat_core::models::scenario::Scenario;

use crate::controller::{TROUBLESHOOT_PROMPT, UPDATE_NOTICE};
use crate::error::ConversationError;

pub const CUSTOM_QUESTION: &str = "Custom question";

const CUSTOM_WELCOME: &str = "Hi! I'm here to help you navigate NSW government services. I'll analyze your question and provide personalized guidance.";

const FOLLOW_UP: &str = "Could you provide more details about your current situation or what specific outcome you're looking for?";

const SCENARIO_COMPLETE: &str = "Perfect! I have all the information I need. Let me create your personalized roadmap now.";

const CUSTOM_COMPLETE: &str = "Thank you for the information! Based on what you've told me, I can now create a personalized action plan to help you with your NSW government service needs.";

const NO_QUESTIONS: &str = "Tell me about your situation.";

#[derive(Debug, Clone)]
pub struct GuidedFlow {
    scenario: Option<Scenario>,
    messages: Vec<ConversationMessage>,
    responses: Vec<UserResponse>,
    current: usize,
    complete: bool,
    troubleshooting: bool,
    seq: u64,
}

impl GuidedFlow {
    /// Start a flow. `initial_message` is the question a custom conversation
    /// was opened with; it is ignored for scenarios.
    pub fn start(scenario: Option<Scenario>, initial_message: Option<&str>, now: Timestamp) -> Self {
        let mut messages = Vec::new();
        match &scenario {
            Some(s) => {
                messages.push(ConversationMessage::bot(
                    "welcome",
                    format!(
                        "Great! I'll help you with \"{}\". Let me ask you a few questions to create a personalized roadmap for you.",
                        s.title
                    ),
                    now,
                ));
                let first = s.questions.first().map(String::as_str).unwrap_or(NO_QUESTIONS);
                messages.push(ConversationMessage::bot("q1", first, now));
            }
            None => {
                messages.push(ConversationMessage::bot("welcome", CUSTOM_WELCOME, now));
                if let Some(initial) = initial_message.map(str::trim).filter(|m| !m.is_empty()) {
                    messages.push(ConversationMessage::user("initial-user", initial, now));
                    messages.push(ConversationMessage::bot(
                        "initial-response",
                        format!(
                            "I understand you're asking about: \"{initial}\". Let me help you with this. To provide the most accurate guidance, I'll need to ask you a few questions about your specific situation."
                        ),
                        now,
                    ));
                    messages.push(ConversationMessage::bot("followup-q1", FOLLOW_UP, now));
                }
            }
        }

        Self {
            scenario,
            messages,
            responses: Vec::new(),
            current: 0,
            complete: false,
            troubleshooting: false,
            seq: 0,
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn responses(&self) -> &[UserResponse] {
        &self.responses
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_troubleshooting(&self) -> bool {
        self.troubleshooting
    }

    /// Input is taken until the flow completes, and again in troubleshooting.
    pub fn accepts_input(&self) -> bool {
        !self.complete || self.troubleshooting
    }

    /// `(question number, total)` for a scenario flow.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.scenario
            .as_ref()
            .filter(|s| !s.questions.is_empty())
            .map(|s| ((self.current + 1).min(s.questions.len()), s.questions.len()))
    }

    pub fn answer(&mut self, text: &str, now: Timestamp) -> Result<(), ConversationError> {
        if !self.accepts_input() {
            return Err(ConversationError::FlowComplete);
        }
        if text.trim().is_empty() {
            return Err(ConversationError::EmptyAnswer);
        }

        let question = self
            .scenario
            .as_ref()
            .and_then(|s| s.questions.get(self.current))
            .map(String::as_str)
            .unwrap_or(CUSTOM_QUESTION)
            .to_string();
        self.responses.push(UserResponse {
            question_index: self.current,
            question,
            answer: text.to_string(),
        });
        let id = self.next_id("user", now);
        self.messages.push(ConversationMessage::user(id, text, now));

        let next_question = self
            .scenario
            .as_ref()
            .and_then(|s| s.questions.get(self.current + 1))
            .cloned();
        match next_question {
            Some(next) => {
                self.current += 1;
                self.messages
                    .push(ConversationMessage::bot(format!("q{}", self.current + 1), next, now));
            }
            None => {
                let done = if self.scenario.is_some() { SCENARIO_COMPLETE } else { CUSTOM_COMPLETE };
                let id = self.next_id("complete", now);
                self.messages.push(ConversationMessage::bot(id, done, now));
                self.complete = true;
            }
        }
        Ok(())
    }

    pub fn troubleshoot(&mut self, now: Timestamp) {
        let id = self.next_id("troubleshoot", now);
        self.messages.push(ConversationMessage::bot(id, TROUBLESHOOT_PROMPT, now));
        self.troubleshooting = true;
        self.complete = false;
    }

    pub fn edit_response(&mut self, index: usize, answer: &str, now: Timestamp) -> Result<(), ConversationError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ConversationError::EmptyAnswer);
        }
        edit_answer(&mut self.responses, index, answer)?;
        let id = self.next_id("update", now);
        self.messages.push(ConversationMessage::bot(id, UPDATE_NOTICE, now));
        Ok(())
    }

    fn next_id(&mut self, prefix: &str, now: Timestamp) -> String {
        self.seq += 1;
        sequenced_id(prefix, now, self.seq)
    }
}
