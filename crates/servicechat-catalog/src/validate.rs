//! Consistency checks over the static catalog.

use std::collections::HashSet;

use servicechat_core::models::scenario::validate_scenario_id;

use crate::error::CatalogError;
use crate::forms::{FieldKind, form_template, template_step_ids};
use crate::{ScenarioDefinition, all_scenarios};

/// Validate every scenario, step and form template.
///
/// Returns the first problem found.
pub fn validate_catalog() -> Result<(), CatalogError> {
    let scenarios = all_scenarios();
    let mut seen = HashSet::new();
    let mut form_steps = HashSet::new();

    for scenario in &scenarios {
        validate_scenario_id(scenario.id())?;
        if !seen.insert(scenario.id().to_string()) {
            return Err(CatalogError::DuplicateScenario(scenario.id().to_string()));
        }
        validate_scenario(scenario.as_ref())?;
        form_steps.extend(
            scenario
                .roadmap_steps()
                .iter()
                .filter(|s| s.form_required)
                .map(|s| s.id.clone()),
        );
    }

    for step_id in template_step_ids() {
        if !form_steps.contains(step_id) {
            return Err(CatalogError::OrphanTemplate {
                step_id: step_id.to_string(),
            });
        }
        validate_template(step_id)?;
    }

    Ok(())
}

fn validate_scenario(scenario: &dyn ScenarioDefinition) -> Result<(), CatalogError> {
    if scenario.questions().is_empty() {
        return Err(CatalogError::NoQuestions {
            scenario_id: scenario.id().to_string(),
        });
    }

    // Dependencies may only point at steps listed earlier.
    let mut earlier: HashSet<&str> = HashSet::new();
    for step in scenario.roadmap_steps() {
        for dep in &step.dependencies {
            if !earlier.contains(dep.as_str()) {
                return Err(CatalogError::BadDependency {
                    scenario_id: scenario.id().to_string(),
                    step_id: step.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
        if step.estimated_minutes().is_none() {
            return Err(CatalogError::BadEstimate {
                step_id: step.id.clone(),
                estimate: step.estimated_time.clone(),
            });
        }
        if !earlier.insert(step.id.as_str()) {
            return Err(CatalogError::DuplicateStep {
                scenario_id: scenario.id().to_string(),
                step_id: step.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_template(step_id: &str) -> Result<(), CatalogError> {
    let mut fields = HashSet::new();
    for field in form_template(step_id).unwrap_or_default() {
        if !fields.insert(field.id.as_str()) {
            return Err(CatalogError::DuplicateField {
                step_id: step_id.to_string(),
                field_id: field.id.clone(),
            });
        }
        if let FieldKind::Select { options } = &field.kind
            && options.is_empty()
        {
            return Err(CatalogError::EmptyOptions {
                step_id: step_id.to_string(),
                field_id: field.id.clone(),
            });
        }
    }
    Ok(())
}
