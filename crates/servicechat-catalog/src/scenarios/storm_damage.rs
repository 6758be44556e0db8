use std::sync::LazyLock;

use servicechat_core::models::scenario::ScenarioCategory;

use crate::ScenarioDefinition;
use crate::locations::LocationKind;
use crate::roadmap::{Priority, RoadmapStep, StepKind, StepSpec};

/// Recovering after storm damage to a property.
pub struct StormDamage;

impl ScenarioDefinition for StormDamage {
    fn id(&self) -> &str {
        "storm-damage"
    }

    fn title(&self) -> &str {
        "A storm damaged my property"
    }

    fn description(&self) -> &str {
        "Report damage and access emergency assistance"
    }

    fn category(&self) -> ScenarioCategory {
        ScenarioCategory::Emergency
    }

    fn estimated_time(&self) -> &str {
        "3-4 hours"
    }

    fn questions(&self) -> &[String] {
        static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
            [
                "What type of damage occurred?",
                "Do you have insurance?",
                "Is your property currently habitable?",
                "Do you need temporary accommodation?",
            ]
            .map(String::from)
            .to_vec()
        });
        &QUESTIONS
    }

    fn roadmap_steps(&self) -> &[RoadmapStep] {
        static STEPS: LazyLock<Vec<RoadmapStep>> = LazyLock::new(|| {
            vec![
                StepSpec {
                    id: "emergency-assistance",
                    title: "Apply for Emergency Financial Assistance",
                    description: "Immediate financial help for storm damage",
                    kind: StepKind::Online,
                    estimated_time: "20 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Visit Service NSW website",
                        "Complete Disaster Relief Grant application",
                        "Provide photos of damage and insurance details",
                        "Submit application with proof of identity",
                        "Funds typically available within 48 hours",
                    ],
                }
                .into(),
                StepSpec {
                    id: "insurance-claim",
                    title: "Lodge Insurance Claim",
                    description: "Report damage to your insurance company",
                    kind: StepKind::Online,
                    estimated_time: "45 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: false,
                    instructions: &[
                        "Contact your insurance company immediately",
                        "Take detailed photos of all damage",
                        "Complete insurance claim form online or by phone",
                        "Schedule assessor visit if required",
                        "Keep all receipts for temporary repairs",
                    ],
                }
                .into(),
                StepSpec {
                    id: "temporary-accommodation",
                    title: "Find Temporary Accommodation",
                    description: "Secure safe housing while repairs are completed",
                    kind: StepKind::Offline,
                    estimated_time: "2 hours",
                    priority: Priority::High,
                    dependencies: &[],
                    location: Some(LocationKind::LocalCouncilOrRedCross),
                    form_required: false,
                    instructions: &[
                        "Contact local council for emergency accommodation",
                        "Check with Red Cross for evacuation centers",
                        "Arrange temporary rental if insurance covers it",
                        "Notify utility companies of temporary address change",
                    ],
                }
                .into(),
            ]
        });
        &STEPS
    }
}
