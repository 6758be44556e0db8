use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Scope token used in place of a scenario id for free-form chats.
pub const CUSTOM_SCOPE: &str = "custom";

/// Scenario id that branches into the birth-registration wizard.
pub const BIRTH_REGISTRATION_SCENARIO: &str = "new-baby";

/// A predefined government-service use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ScenarioCategory,
    pub estimated_time: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioCategory {
    LifeEvent,
    Emergency,
    General,
}

impl ScenarioCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::LifeEvent => "life event",
            Self::Emergency => "emergency",
            Self::General => "general",
        }
    }
}

impl Scenario {
    pub fn is_birth_registration(&self) -> bool {
        self.id == BIRTH_REGISTRATION_SCENARIO
    }
}

/// Check that a scenario id is usable as a storage key segment.
///
/// Ids are lowercase kebab-case and may not collide with [`CUSTOM_SCOPE`].
pub fn validate_scenario_id(id: &str) -> Result<(), CoreError> {
    let well_formed = !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !well_formed || id == CUSTOM_SCOPE {
        return Err(CoreError::InvalidScenarioId(id.to_string()));
    }
    Ok(())
}
