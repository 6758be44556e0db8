//! servicechat-catalog
//!
//! Static reference data for ServiceChat. Pure data — no I/O.
//! Defines the scenario catalog, the roadmap steps each scenario offers,
//! form-field templates for steps that need a form, and the directory of
//! service locations for steps done in person.

pub mod error;
pub mod forms;
pub mod locations;
pub mod roadmap;
pub mod scenarios;
pub mod validate;

use servicechat_core::models::scenario::{Scenario, ScenarioCategory};

use roadmap::RoadmapStep;

/// Trait implemented by each predefined scenario.
pub trait ScenarioDefinition: Send + Sync {
    /// Stable identifier (e.g., "new-baby", "storm-damage").
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn description(&self) -> &str;

    fn category(&self) -> ScenarioCategory;

    /// Rough end-to-end effort, e.g. "1-2 hours".
    fn estimated_time(&self) -> &str;

    /// The guided questions, in the order they are asked.
    fn questions(&self) -> &[String];

    /// The roadmap steps offered once the conversation is complete.
    fn roadmap_steps(&self) -> &[RoadmapStep];

    /// Flatten into the shared domain record.
    fn to_scenario(&self) -> Scenario {
        Scenario {
            id: self.id().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            category: self.category(),
            estimated_time: self.estimated_time().to_string(),
            questions: self.questions().to_vec(),
        }
    }
}

/// Return all registered scenarios, in display order.
pub fn all_scenarios() -> Vec<Box<dyn ScenarioDefinition>> {
    vec![
        Box::new(scenarios::new_arrival::NewArrival),
        Box::new(scenarios::new_baby::NewBaby),
        Box::new(scenarios::storm_damage::StormDamage),
        Box::new(scenarios::change_address::ChangeAddress),
        Box::new(scenarios::business_registration::BusinessRegistration),
    ]
}

/// Look up a scenario by ID.
pub fn get_scenario(id: &str) -> Option<Box<dyn ScenarioDefinition>> {
    all_scenarios().into_iter().find(|s| s.id() == id)
}

/// The catalog as plain domain records.
pub fn scenario_catalog() -> Vec<Scenario> {
    all_scenarios().iter().map(|s| s.to_scenario()).collect()
}
