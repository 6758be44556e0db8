use std::sync::LazyLock;

use servicechat_core::models::scenario::ScenarioCategory;

use crate::ScenarioDefinition;
use crate::roadmap::{Priority, RoadmapStep, StepKind, StepSpec};

/// Moving house and updating records everywhere.
pub struct ChangeAddress;

impl ScenarioDefinition for ChangeAddress {
    fn id(&self) -> &str {
        "change-address"
    }

    fn title(&self) -> &str {
        "I need to change my address"
    }

    fn description(&self) -> &str {
        "Update your address across all government services"
    }

    fn category(&self) -> ScenarioCategory {
        ScenarioCategory::General
    }

    fn estimated_time(&self) -> &str {
        "20-30 minutes"
    }

    fn questions(&self) -> &[String] {
        static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
            [
                "What is your new address?",
                "When did you move?",
                "Do you have a driver's license to update?",
                "Are you enrolled to vote?",
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
                    id: "electoral-roll",
                    title: "Update Electoral Roll",
                    description: "Update your voting address",
                    kind: StepKind::Online,
                    estimated_time: "5 minutes",
                    priority: Priority::Medium,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Visit Australian Electoral Commission website",
                        "Complete online enrollment form",
                        "Provide new address details",
                        "Submit form - update is immediate",
                    ],
                }
                .into(),
                StepSpec {
                    id: "driver-license-address",
                    title: "Update Driver License Address",
                    description: "Change address on your NSW driver license",
                    kind: StepKind::Online,
                    estimated_time: "10 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Log into Service NSW website",
                        "Select 'Change address on driver license'",
                        "Enter new address details",
                        "Pay the change fee online",
                        "New license will be mailed to new address",
                    ],
                }
                .into(),
                StepSpec {
                    id: "medicare-address",
                    title: "Update Medicare Address",
                    description: "Ensure Medicare correspondence reaches you",
                    kind: StepKind::Online,
                    estimated_time: "5 minutes",
                    priority: Priority::Medium,
                    dependencies: &[],
                    location: None,
                    form_required: false,
                    instructions: &[
                        "Log into myGov account",
                        "Access Medicare online services",
                        "Update personal details section",
                        "Change address and contact information",
                        "Confirm changes are saved",
                    ],
                }
                .into(),
            ]
        });
        &STEPS
    }
}
