use serde::{Deserialize, Serialize};
use servicechat_catalog::get_scenario;
use servicechat_catalog::roadmap::RoadmapStep;

use crate::error::ConversationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub step: RoadmapStep,
    pub completed: bool,
}

/// A scenario's checklist and the user's progress through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    items: Vec<RoadmapItem>,
}

impl Roadmap {
    /// Steps for a catalog scenario. Custom and unknown scenarios get an
    /// empty roadmap.
    pub fn for_scenario(scenario_id: Option<&str>) -> Self {
        let items = scenario_id
            .and_then(get_scenario)
            .map(|s| {
                s.roadmap_steps()
                    .iter()
                    .map(|step| RoadmapItem {
                        step: step.clone(),
                        completed: false,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { items }
    }

    pub fn items(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn step(&self, step_id: &str) -> Option<&RoadmapStep> {
        self.items.iter().find(|i| i.step.id == step_id).map(|i| &i.step)
    }

    /// Flip a step's completion, returning the new value.
    pub fn toggle(&mut self, step_id: &str) -> Result<bool, ConversationError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.step.id == step_id)
            .ok_or_else(|| ConversationError::UnknownStep(step_id.to_string()))?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    /// Sum of all step estimates. Unparseable estimates count as zero.
    pub fn total_minutes(&self) -> u32 {
        self.items.iter().filter_map(|i| i.step.estimated_minutes()).sum()
    }

    /// Rounded percentage of completed steps; 0 for an empty roadmap.
    pub fn progress_percent(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        let pct = (self.completed_count() as f64 / self.items.len() as f64) * 100.0;
        pct.round() as u8
    }

    /// Dependencies of `step_id` that are not yet completed.
    pub fn blocked_by(&self, step_id: &str) -> Result<Vec<&str>, ConversationError> {
        let step = self
            .step(step_id)
            .ok_or_else(|| ConversationError::UnknownStep(step_id.to_string()))?;
        Ok(step
            .dependencies
            .iter()
            .filter(|dep| !self.items.iter().any(|i| &i.step.id == *dep && i.completed))
            .map(String::as_str)
            .collect())
    }

    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.completed)
    }
}

/// `"1h 20m"` from an hour up, `"45m"` below.
pub fn format_minutes(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}
