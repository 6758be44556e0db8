//! Form assistance for a roadmap step.
//!
//! Review is deterministic: a submission is approved when every required
//! field has a value, otherwise declined with the labels that are missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use servicechat_catalog::forms::{FieldKind, PrefilledField, prefilled_template};
use servicechat_catalog::roadmap::RoadmapStep;
use servicechat_core::models::response::UserResponse;

use crate::error::ConversationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Approved,
    Declined { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormAssistance {
    pub step_id: String,
    pub step_title: String,
    fields: Vec<PrefilledField>,
    values: HashMap<String, String>,
    status: FormStatus,
}

impl FormAssistance {
    /// Open the form for `step`, seeding values from earlier answers.
    pub fn open(step: &RoadmapStep, responses: &[UserResponse]) -> Result<Self, ConversationError> {
        if !step.form_required {
            return Err(ConversationError::NoForm(step.id.clone()));
        }
        let fields = prefilled_template(&step.id, responses);
        let values = fields
            .iter()
            .filter_map(|f| f.prefilled_value.clone().map(|v| (f.field.id.clone(), v)))
            .collect();
        Ok(Self {
            step_id: step.id.clone(),
            step_title: step.title.clone(),
            fields,
            values,
            status: FormStatus::Draft,
        })
    }

    pub fn fields(&self) -> &[PrefilledField] {
        &self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    pub fn prefilled_count(&self) -> usize {
        self.fields.iter().filter(|f| f.prefilled_value.is_some()).count()
    }

    /// Set a field. Select fields only accept one of their options; an empty
    /// value clears the field.
    pub fn set(&mut self, field_id: &str, value: &str) -> Result<(), ConversationError> {
        if self.status != FormStatus::Draft {
            return Err(ConversationError::AlreadySubmitted);
        }
        let field = self
            .fields
            .iter()
            .find(|f| f.field.id == field_id)
            .ok_or_else(|| ConversationError::UnknownField(field_id.to_string()))?;

        let value = value.trim();
        if value.is_empty() {
            self.values.remove(field_id);
            return Ok(());
        }
        if let FieldKind::Select { options } = &field.field.kind
            && !options.iter().any(|o| o == value)
        {
            return Err(ConversationError::InvalidOption {
                field: field_id.to_string(),
                value: value.to_string(),
            });
        }
        self.values.insert(field_id.to_string(), value.to_string());
        Ok(())
    }

    /// Labels of required fields without a value, in form order.
    pub fn missing_required(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.field.required && self.value(&f.field.id).is_none_or(str::is_empty))
            .map(|f| f.field.label.as_str())
            .collect()
    }

    pub fn submit(&mut self) -> Result<&FormStatus, ConversationError> {
        if self.status != FormStatus::Draft {
            return Err(ConversationError::AlreadySubmitted);
        }
        let missing = self.missing_required();
        self.status = if missing.is_empty() {
            FormStatus::Approved
        } else {
            FormStatus::Declined {
                reason: format!("Missing required fields: {}", missing.join(", ")),
            }
        };
        tracing::info!(step_id = %self.step_id, status = ?self.status, "form reviewed");
        Ok(&self.status)
    }

    /// Back to draft after a decline. Values are kept.
    pub fn fix_issues(&mut self) {
        self.status = FormStatus::Draft;
    }
}
