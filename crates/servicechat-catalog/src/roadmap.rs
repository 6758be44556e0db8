use serde::{Deserialize, Serialize};

use crate::locations::LocationKind;

/// One actionable step on a scenario's roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: StepKind,
    /// Free-text estimate such as "20 minutes" or "1 hour".
    pub estimated_time: String,
    pub priority: Priority,
    /// Step ids that should be completed first.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Where an offline step is carried out, if a directory exists for it.
    pub location: Option<LocationKind>,
    #[serde(default)]
    pub form_required: bool,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl RoadmapStep {
    /// Estimate in minutes: the leading number, times 60 when the unit is hours.
    ///
    /// Returns `None` when the estimate does not start with a number.
    pub fn estimated_minutes(&self) -> Option<u32> {
        let amount: u32 = self.estimated_time.split_whitespace().next()?.parse().ok()?;
        let factor = if self.estimated_time.contains("hour") { 60 } else { 1 };
        Some(amount * factor)
    }
}

/// Shorthand used by the scenario tables.
pub(crate) struct StepSpec<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub kind: StepKind,
    pub estimated_time: &'a str,
    pub priority: Priority,
    pub dependencies: &'a [&'a str],
    pub location: Option<LocationKind>,
    pub form_required: bool,
    pub instructions: &'a [&'a str],
}

impl From<StepSpec<'_>> for RoadmapStep {
    fn from(s: StepSpec<'_>) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            kind: s.kind,
            estimated_time: s.estimated_time.to_string(),
            priority: s.priority,
            dependencies: s.dependencies.iter().map(|d| d.to_string()).collect(),
            location: s.location,
            form_required: s.form_required,
            instructions: s.instructions.iter().map(|i| i.to_string()).collect(),
        }
    }
}
