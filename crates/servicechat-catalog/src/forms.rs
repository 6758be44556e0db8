//! Form-field templates for roadmap steps that need a form.
//!
//! Templates are keyed by roadmap step id. A field may name the guided
//! question whose answer pre-fills it; matching is case-insensitive on the
//! question text.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use servicechat_core::models::response::{UserResponse, answer_for};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select { options: Vec<String> },
    TextArea,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub guidance: String,
    /// Question whose answer pre-fills this field.
    pub prefill_question: Option<String>,
}

/// A template field together with the value pre-filled from earlier answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefilledField {
    pub field: FormField,
    pub prefilled_value: Option<String>,
}

struct FieldSpec<'a> {
    id: &'a str,
    label: &'a str,
    kind: FieldKind,
    required: bool,
    placeholder: Option<&'a str>,
    guidance: &'a str,
    prefill_question: Option<&'a str>,
}

impl From<FieldSpec<'_>> for FormField {
    fn from(f: FieldSpec<'_>) -> Self {
        Self {
            id: f.id.to_string(),
            label: f.label.to_string(),
            kind: f.kind,
            required: f.required,
            placeholder: f.placeholder.map(str::to_string),
            guidance: f.guidance.to_string(),
            prefill_question: f.prefill_question.map(str::to_string),
        }
    }
}

fn select(options: &[&str]) -> FieldKind {
    FieldKind::Select {
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

static TEMPLATES: LazyLock<HashMap<&'static str, Vec<FormField>>> = LazyLock::new(|| {
    let mut templates = HashMap::new();

    templates.insert(
        "tfn",
        vec![
            FieldSpec {
                id: "title",
                label: "Title",
                kind: select(&["Mr", "Ms", "Mrs", "Dr", "Prof"]),
                required: false,
                placeholder: None,
                guidance: "Select your preferred title. This is optional but helps with official correspondence.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "firstName",
                label: "First Name",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter your first name"),
                guidance: "Enter your first name exactly as it appears on your passport or visa documents.",
                prefill_question: Some("first name"),
            }
            .into(),
            FieldSpec {
                id: "lastName",
                label: "Last Name",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter your last name"),
                guidance: "Enter your surname/family name exactly as it appears on your passport or visa documents.",
                prefill_question: Some("last name"),
            }
            .into(),
            FieldSpec {
                id: "dateOfBirth",
                label: "Date of Birth",
                kind: FieldKind::Date,
                required: true,
                placeholder: None,
                guidance: "Enter your date of birth in DD/MM/YYYY format. This must match your passport.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "visaType",
                label: "Visa Type",
                kind: select(&[
                    "Student Visa (500)",
                    "Working Holiday (417)",
                    "Skilled Independent (189)",
                    "Partner Visa (820)",
                    "Other",
                ]),
                required: true,
                placeholder: None,
                guidance: "Select the visa type that matches your current Australian visa.",
                prefill_question: Some("What type of visa do you have?"),
            }
            .into(),
            FieldSpec {
                id: "passportNumber",
                label: "Passport Number",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter passport number"),
                guidance: "Enter your passport number without spaces. This is usually 8-9 characters long.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "countryOfBirth",
                label: "Country of Birth",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter country of birth"),
                guidance: "Enter the country where you were born, not your nationality.",
                prefill_question: None,
            }
            .into(),
        ],
    );

    templates.insert(
        "birth-certificate",
        vec![
            FieldSpec {
                id: "babyFirstName",
                label: "Baby's First Name",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter baby's first name"),
                guidance: "Choose carefully - this will be your child's legal name. Avoid unusual spellings that may cause issues later.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "babyLastName",
                label: "Baby's Last Name",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter baby's last name"),
                guidance: "This can be either parent's surname or a combination. Consider how it will appear on official documents.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "birthDate",
                label: "Date of Birth",
                kind: FieldKind::Date,
                required: true,
                placeholder: None,
                guidance: "Enter the exact date and time from the hospital birth notification.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "birthPlace",
                label: "Place of Birth",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Hospital name and suburb"),
                guidance: "Enter the full name of the hospital or birthing center where your baby was born.",
                prefill_question: Some("Where was your baby born?"),
            }
            .into(),
            FieldSpec {
                id: "motherName",
                label: "Mother's Full Name",
                kind: FieldKind::Text,
                required: true,
                placeholder: Some("Enter mother's full name"),
                guidance: "Enter the mother's full legal name as it appears on official documents.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "fatherName",
                label: "Father's Full Name",
                kind: FieldKind::Text,
                required: false,
                placeholder: Some("Enter father's full name"),
                guidance: "Enter the father's full legal name. Leave blank if not applicable.",
                prefill_question: None,
            }
            .into(),
        ],
    );

    templates.insert(
        "emergency-assistance",
        vec![
            FieldSpec {
                id: "incidentDate",
                label: "Date of Incident",
                kind: FieldKind::Date,
                required: true,
                placeholder: None,
                guidance: "Enter the date when the storm damage occurred. This helps determine eligibility.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "propertyAddress",
                label: "Property Address",
                kind: FieldKind::TextArea,
                required: true,
                placeholder: Some("Enter full property address"),
                guidance: "Provide the complete address of the damaged property including postcode.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "damageType",
                label: "Type of Damage",
                kind: select(&[
                    "Roof damage",
                    "Flooding",
                    "Structural damage",
                    "Contents damage",
                    "Multiple types",
                ]),
                required: true,
                placeholder: None,
                guidance: "Select the primary type of damage. You can provide more details in the description field.",
                prefill_question: Some("What type of damage occurred?"),
            }
            .into(),
            FieldSpec {
                id: "damageDescription",
                label: "Damage Description",
                kind: FieldKind::TextArea,
                required: true,
                placeholder: Some("Describe the damage in detail"),
                guidance: "Provide a detailed description of all damage. This helps assessors understand the extent of impact.",
                prefill_question: None,
            }
            .into(),
            FieldSpec {
                id: "insuranceStatus",
                label: "Insurance Status",
                kind: select(&[
                    "Fully insured",
                    "Partially insured",
                    "Not insured",
                    "Claim denied",
                ]),
                required: true,
                placeholder: None,
                guidance: "Select your insurance situation. This affects the type of assistance available.",
                prefill_question: Some("Do you have insurance?"),
            }
            .into(),
        ],
    );

    templates
});

/// The raw template for a step, if it has one.
pub fn form_template(step_id: &str) -> Option<&'static [FormField]> {
    TEMPLATES.get(step_id).map(Vec::as_slice)
}

/// Step ids that have a form template.
pub fn template_step_ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = TEMPLATES.keys().copied().collect();
    ids.sort_unstable();
    ids
}

/// Build the template for `step_id` with values pre-filled from `responses`.
///
/// Steps without a template yield an empty list.
pub fn prefilled_template(step_id: &str, responses: &[UserResponse]) -> Vec<PrefilledField> {
    form_template(step_id)
        .unwrap_or_default()
        .iter()
        .map(|field| PrefilledField {
            prefilled_value: field
                .prefill_question
                .as_deref()
                .and_then(|q| answer_for(responses, q))
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            field: field.clone(),
        })
        .collect()
}
