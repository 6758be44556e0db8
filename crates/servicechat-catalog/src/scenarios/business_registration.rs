use std::sync::LazyLock;

use servicechat_core::models::scenario::ScenarioCategory;

use crate::ScenarioDefinition;
use crate::locations::LocationKind;
use crate::roadmap::{Priority, RoadmapStep, StepKind, StepSpec};

/// Starting a business.
pub struct BusinessRegistration;

impl ScenarioDefinition for BusinessRegistration {
    fn id(&self) -> &str {
        "business-registration"
    }

    fn title(&self) -> &str {
        "I want to start a business"
    }

    fn description(&self) -> &str {
        "Register your business and get required licenses"
    }

    fn category(&self) -> ScenarioCategory {
        ScenarioCategory::General
    }

    fn estimated_time(&self) -> &str {
        "1-2 hours"
    }

    fn questions(&self) -> &[String] {
        static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
            [
                "What type of business are you starting?",
                "Will you have employees?",
                "Do you need specific licenses or permits?",
                "What business structure do you prefer?",
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
                    id: "abn",
                    title: "Apply for Australian Business Number (ABN)",
                    description: "Essential identifier for your business",
                    kind: StepKind::Online,
                    estimated_time: "20 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Visit Australian Business Register website",
                        "Complete ABN application form",
                        "Provide business structure and activity details",
                        "Submit application - ABN issued immediately if eligible",
                    ],
                }
                .into(),
                StepSpec {
                    id: "business-name",
                    title: "Register Business Name",
                    description: "Protect your business name legally",
                    kind: StepKind::Online,
                    estimated_time: "15 minutes",
                    priority: Priority::Medium,
                    dependencies: &["abn"],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Search available business names on ASIC website",
                        "Complete business name registration",
                        "Pay registration fee",
                        "Receive business name certificate",
                    ],
                }
                .into(),
                StepSpec {
                    id: "business-licenses",
                    title: "Apply for Required Business Licenses",
                    description: "Obtain necessary permits for your business type",
                    kind: StepKind::Online,
                    estimated_time: "1 hour",
                    priority: Priority::High,
                    dependencies: &["abn"],
                    location: Some(LocationKind::VariousGovernmentAgencies),
                    form_required: false,
                    instructions: &[
                        "Use Business License Information Service to identify required licenses",
                        "Apply for each license separately",
                        "Provide business details and compliance information",
                        "Pay license fees and wait for approval",
                    ],
                }
                .into(),
            ]
        });
        &STEPS
    }
}
