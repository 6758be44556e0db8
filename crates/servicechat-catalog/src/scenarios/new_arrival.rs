use std::sync::LazyLock;

use servicechat_core::models::scenario::ScenarioCategory;

use crate::ScenarioDefinition;
use crate::locations::LocationKind;
use crate::roadmap::{Priority, RoadmapStep, StepKind, StepSpec};

/// Getting set up as a new resident.
pub struct NewArrival;

impl ScenarioDefinition for NewArrival {
    fn id(&self) -> &str {
        "new-arrival"
    }

    fn title(&self) -> &str {
        "I just arrived in Australia"
    }

    fn description(&self) -> &str {
        "Get essential services set up as a new resident"
    }

    fn category(&self) -> ScenarioCategory {
        ScenarioCategory::LifeEvent
    }

    fn estimated_time(&self) -> &str {
        "2-3 hours"
    }

    fn questions(&self) -> &[String] {
        static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
            [
                "What type of visa do you have?",
                "Which state/territory are you living in?",
                "Do you have a job offer or employment?",
                "Do you need to transfer an overseas license?",
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
                    id: "tfn",
                    title: "Apply for Tax File Number (TFN)",
                    description: "Essential for working and banking in Australia",
                    kind: StepKind::Online,
                    estimated_time: "15 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Visit the ATO website",
                        "Complete the online TFN application",
                        "Provide your visa details and passport information",
                        "Submit the application - you'll receive your TFN by mail in 10-14 days",
                    ],
                }
                .into(),
                StepSpec {
                    id: "medicare",
                    title: "Apply for Medicare Card",
                    description: "Access to Australia's public health system",
                    kind: StepKind::Offline,
                    estimated_time: "30 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: Some(LocationKind::MedicareServiceCentre),
                    form_required: false,
                    instructions: &[
                        "Gather required documents: passport, visa, proof of address",
                        "Visit your nearest Medicare Service Centre",
                        "Complete the Medicare enrollment form",
                        "Submit documents and receive temporary card immediately",
                    ],
                }
                .into(),
                StepSpec {
                    id: "bank-account",
                    title: "Open Australian Bank Account",
                    description: "Essential for receiving salary and managing finances",
                    kind: StepKind::Offline,
                    estimated_time: "45 minutes",
                    priority: Priority::High,
                    dependencies: &["tfn"],
                    location: Some(LocationKind::BankBranch),
                    form_required: false,
                    instructions: &[
                        "Choose a bank and find the nearest branch",
                        "Bring passport, visa, and proof of address",
                        "Apply within 6 weeks of arrival for easier requirements",
                        "Set up online banking and get your debit card",
                    ],
                }
                .into(),
                StepSpec {
                    id: "driver-license",
                    title: "Convert Overseas Driver License",
                    description: "Convert your overseas license to NSW license",
                    kind: StepKind::Offline,
                    estimated_time: "1 hour",
                    priority: Priority::Medium,
                    dependencies: &[],
                    location: Some(LocationKind::ServiceNswCentre),
                    form_required: true,
                    instructions: &[
                        "Book an appointment at Service NSW",
                        "Bring your overseas license and official translation",
                        "Complete the driver license application form",
                        "Pass knowledge test if required",
                        "Pay the license fee and receive temporary license",
                    ],
                }
                .into(),
            ]
        });
        &STEPS
    }
}
