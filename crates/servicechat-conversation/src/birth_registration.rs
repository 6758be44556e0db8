//! Birth-registration wizard.
//!
//! Selecting the `new-baby` scenario opens this form instead of the plain
//! chat. Two gating questions decide what is shown: `bornInNSW` must be
//! "yes" before the relationship and identity questions appear, and
//! `hasIdentityDocs` must also be "yes" before the rest of the form appears.
//! A side panel lets the user ask the assistant about the form; each question
//! carries a snapshot of the current answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use servicechat_core::models::message::MessageRole;
use servicechat_transport::chat::FORM_FAILURE_REPLY;
use servicechat_transport::prompts::{NOT_ANSWERED, birth_form_question};

use crate::error::ConversationError;
use crate::event::ChatOutcome;
use crate::views::form::FormStatus;

use BirthFieldKind::{Checkbox, Choice, Date, Email, Number, Text};
use Gate::{Always, BornInHospital, Eligible, InNsw};

pub const OUTSIDE_NSW_INFO: &str = "If the birth was outside of NSW, you need to apply to the Registry office in that state or territory.\nFor births outside NSW, see the federal guide: https://www.servicesaustralia.gov.au/register-birth-your-baby?context=60001\nOr, click for interstate registries contact details: https://www.bdm.nsw.gov.au/Pages/births/interstate-registries.aspx";

pub const MISSING_ID_INFO: &str = "A range of identity documents are accepted for this application including a rates notice or utility bill. If you still don't have enough ID, a paper form can be submitted with other supporting documents. See: https://www.nsw.gov.au/family-and-relationships/births/register-your-baby";

const YES_NO: &[&str] = &["yes", "no"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthFieldKind {
    Choice(&'static [&'static str]),
    Text,
    Email,
    Date,
    /// Whole number in an inclusive range.
    Number { min: u32, max: u32 },
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Always,
    /// `bornInNSW == yes`
    InNsw,
    /// `bornInNSW == yes` and `hasIdentityDocs == yes`
    Eligible,
    /// Eligible, and `bornInHospital` has the given answer.
    BornInHospital(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct BirthField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: BirthFieldKind,
    pub required: bool,
    gate: Gate,
}

const fn field(id: &'static str, label: &'static str, kind: BirthFieldKind, required: bool, gate: Gate) -> BirthField {
    BirthField {
        id,
        label,
        kind,
        required,
        gate,
    }
}

/// All fields in form order.
pub const FIELDS: &[BirthField] = &[
    field("bornInNSW", "Was the child born in NSW?", Choice(YES_NO), true, Always),
    field(
        "relationship",
        "What is your relationship to the child?",
        Choice(&["mother", "father", "parent", "other"]),
        true,
        InNsw,
    ),
    field(
        "hasIdentityDocs",
        "Do you have 3 forms of valid identity documents for each parent to prove their identity?",
        Choice(YES_NO),
        true,
        InNsw,
    ),
    field("multipleBirth", "Was more than one child born?", Choice(YES_NO), false, Eligible),
    field("bornInHospital", "Was the child born in hospital?", Choice(YES_NO), false, Eligible),
    field("hospitalName", "Hospital name", Text, true, BornInHospital("yes")),
    field("birthAddress", "Address", Text, true, BornInHospital("no")),
    field("babyBundle", "Would you like a baby bundle delivered?", Choice(YES_NO), false, BornInHospital("no")),
    field("email", "Email address", Email, true, Eligible),
    field("confirmEmail", "Confirm email", Email, true, Eligible),
    field("childFullName", "Child's full name", Text, true, Eligible),
    field("childDOB", "Child's date of birth", Date, true, Eligible),
    field("childPlace", "Child's place of birth", Text, true, Eligible),
    field("childSex", "Child's sex", Text, true, Eligible),
    field("childBirthTimeHour", "Time of birth (hour)", Number { min: 0, max: 23 }, false, Eligible),
    field("childBirthTimeMinute", "Time of birth (minute)", Number { min: 0, max: 59 }, false, Eligible),
    field("childBirthWeight", "Child's weight at birth", Text, false, Eligible),
    field("parent1FullName", "Parent 1 full name", Text, true, Eligible),
    field("parent1DOB", "Parent 1 date of birth", Date, true, Eligible),
    field("parent1Place", "Parent 1 place of birth", Text, true, Eligible),
    field("parent1Address", "Parent 1 address", Text, true, Eligible),
    field("parent1Contact", "Parent 1 contact details", Text, true, Eligible),
    field("parent2FullName", "Parent 2 full name", Text, false, Eligible),
    field("parent2DOB", "Parent 2 date of birth", Date, false, Eligible),
    field("parent2Place", "Parent 2 place of birth", Text, false, Eligible),
    field("parent2Address", "Parent 2 address", Text, false, Eligible),
    field("parent2Contact", "Parent 2 contact details", Text, false, Eligible),
    field("maritalStatus", "Marital status of parents", Text, false, Eligible),
    field("siblings", "Other children (siblings)", Text, false, Eligible),
    field("aboriginal", "Aboriginal or Torres Strait Islander origin", Text, false, Eligible),
    field(
        "aboriginalOrigin",
        "Is the child of Aboriginal and/or Torres Strait Islander origin?",
        Choice(&["No", "Aboriginal", "Torres Strait Islander", "Both"]),
        false,
        Eligible,
    ),
    field(
        "assistedReproduction",
        "Was the child conceived through assisted reproductive technology using a donated sperm or ovum (egg)?",
        Choice(YES_NO),
        false,
        Eligible,
    ),
    field("declaration", "I confirm all information is true and correct", Checkbox, true, Eligible),
    field("orderCertificate", "Order a birth certificate (fee applies)", Checkbox, false, Eligible),
    field("paymentDetails", "Payment details", Text, false, Eligible),
];

/// Fields cleared whenever `bornInHospital` changes.
const HOSPITAL_DEPENDENTS: [&str; 3] = ["hospitalName", "birthAddress", "babyBundle"];

pub fn birth_field(id: &str) -> Option<&'static BirthField> {
    FIELDS.iter().find(|f| f.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRegistration {
    values: HashMap<String, String>,
    panel: Vec<PanelMessage>,
    awaiting_answer: bool,
    status: FormStatus,
}

impl Default for BirthRegistration {
    fn default() -> Self {
        Self::new()
    }
}

impl BirthRegistration {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            panel: Vec::new(),
            awaiting_answer: false,
            status: FormStatus::Draft,
        }
    }

    /// Current value; empty when unset. Checkboxes read `"true"`/`"false"`.
    pub fn value(&self, id: &str) -> &str {
        match self.values.get(id) {
            Some(v) => v.as_str(),
            None if birth_field(id).is_some_and(|f| f.kind == Checkbox) => "false",
            None => "",
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.value(id) == "true"
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn panel(&self) -> &[PanelMessage] {
        &self.panel
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.awaiting_answer
    }

    fn gate_open(&self, gate: Gate) -> bool {
        let in_nsw = self.value("bornInNSW") == "yes";
        let eligible = in_nsw && self.value("hasIdentityDocs") == "yes";
        match gate {
            Always => true,
            InNsw => in_nsw,
            Eligible => eligible,
            BornInHospital(answer) => eligible && self.value("bornInHospital") == answer,
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        birth_field(id).is_some_and(|f| self.gate_open(f.gate))
    }

    pub fn visible_fields(&self) -> Vec<&'static BirthField> {
        FIELDS.iter().filter(|f| self.gate_open(f.gate)).collect()
    }

    /// Guidance shown for the current gating answers.
    pub fn info_notices(&self) -> Vec<&'static str> {
        let mut notices = Vec::new();
        if self.value("bornInNSW") == "no" {
            notices.push(OUTSIDE_NSW_INFO);
        }
        if self.value("hasIdentityDocs") == "no" {
            notices.push(MISSING_ID_INFO);
        }
        notices
    }

    /// Set a visible field. An empty value clears it.
    pub fn set(&mut self, id: &str, value: &str) -> Result<(), ConversationError> {
        if self.status != FormStatus::Draft {
            return Err(ConversationError::AlreadySubmitted);
        }
        let field = birth_field(id).ok_or_else(|| ConversationError::UnknownField(id.to_string()))?;
        if !self.gate_open(field.gate) {
            return Err(ConversationError::HiddenField(id.to_string()));
        }

        let value = normalize(field, value.trim())?;
        if id == "bornInHospital" {
            for dependent in HOSPITAL_DEPENDENTS {
                self.values.remove(dependent);
            }
        }
        match value {
            Some(v) => self.values.insert(id.to_string(), v),
            None => self.values.remove(id),
        };
        tracing::debug!(field = id, "birth registration field updated");
        Ok(())
    }

    /// `(field, value)` pairs for every field in form order, with
    /// [`NOT_ANSWERED`] for blanks.
    pub fn answers(&self) -> Vec<(String, String)> {
        FIELDS
            .iter()
            .map(|f| {
                let v = self.value(f.id);
                let v = if v.is_empty() { NOT_ANSWERED } else { v };
                (f.id.to_string(), v.to_string())
            })
            .collect()
    }

    /// Record a side-panel question and return the prompt to send.
    pub fn ask(&mut self, question: &str) -> Result<String, ConversationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ConversationError::EmptyAnswer);
        }
        if self.awaiting_answer {
            return Err(ConversationError::QuestionPending);
        }
        let prompt = birth_form_question(question, &self.answers(), &self.info_notices());
        self.panel.push(PanelMessage {
            role: MessageRole::User,
            content: question.to_string(),
        });
        self.awaiting_answer = true;
        Ok(prompt)
    }

    pub fn receive_answer(&mut self, outcome: ChatOutcome) {
        let content = match outcome {
            ChatOutcome::Reply(text) => text,
            ChatOutcome::Failed(error) => {
                tracing::warn!(%error, "birth registration question failed");
                FORM_FAILURE_REPLY.to_string()
            }
        };
        self.panel.push(PanelMessage {
            role: MessageRole::Bot,
            content,
        });
        self.awaiting_answer = false;
    }

    /// Labels of visible required fields that are still blank. The
    /// declaration checkbox is reported by [`submit`](Self::submit) instead.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.visible_fields()
            .into_iter()
            .filter(|f| f.required && f.kind != Checkbox && self.value(f.id).is_empty())
            .map(|f| f.label)
            .collect()
    }

    pub fn submit(&mut self) -> Result<&FormStatus, ConversationError> {
        if self.status != FormStatus::Draft {
            return Err(ConversationError::AlreadySubmitted);
        }

        let mut problems = Vec::new();
        if self.value("bornInNSW") == "no" {
            problems.push("Births outside NSW must be registered with the registry of that state or territory".to_string());
        } else if self.value("hasIdentityDocs") == "no" {
            problems.push("Identity documents for each parent are required to register online".to_string());
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            problems.push(format!("Missing required fields: {}", missing.join(", ")));
        }
        if self.gate_open(Eligible) {
            if !self.value("email").eq_ignore_ascii_case(self.value("confirmEmail")) {
                problems.push("Email addresses do not match".to_string());
            }
            if !self.is_checked("declaration") {
                problems.push("The declaration must be confirmed".to_string());
            }
        }

        self.status = if problems.is_empty() {
            FormStatus::Approved
        } else {
            FormStatus::Declined {
                reason: problems.join("; "),
            }
        };
        tracing::info!(status = ?self.status, "birth registration reviewed");
        Ok(&self.status)
    }

    pub fn fix_issues(&mut self) {
        self.status = FormStatus::Draft;
    }
}

/// Validate and canonicalize a value for `field`. `None` clears it.
fn normalize(field: &BirthField, value: &str) -> Result<Option<String>, ConversationError> {
    let invalid = |reason: &str| ConversationError::InvalidValue {
        field: field.id.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Ok(match field.kind {
            Checkbox => Some("false".to_string()),
            _ => None,
        });
    }

    match field.kind {
        Choice(options) => options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(value))
            .map(|o| Some(o.to_string()))
            .ok_or_else(|| ConversationError::InvalidOption {
                field: field.id.to_string(),
                value: value.to_string(),
            }),
        Text => Ok(Some(value.to_string())),
        Email => {
            let valid = value
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if valid { Ok(Some(value.to_string())) } else { Err(invalid("expected an email address")) }
        }
        Date => value
            .parse::<jiff::civil::Date>()
            .map(|d| Some(d.to_string()))
            .map_err(|_| invalid("expected a date as YYYY-MM-DD")),
        Number { min, max } => match value.parse::<u32>() {
            Ok(n) if (min..=max).contains(&n) => Ok(Some(n.to_string())),
            _ => Err(invalid(&format!("expected a number from {min} to {max}"))),
        },
        Checkbox => match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" | "1" => Ok(Some("true".to_string())),
            "false" | "no" | "n" | "off" | "0" => Ok(Some("false".to_string())),
            _ => Err(invalid("expected yes or no")),
        },
    }
}
