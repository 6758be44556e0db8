use std::sync::LazyLock;

use servicechat_core::models::scenario::{BIRTH_REGISTRATION_SCENARIO, ScenarioCategory};

use crate::ScenarioDefinition;
use crate::locations::LocationKind;
use crate::roadmap::{Priority, RoadmapStep, StepKind, StepSpec};

/// Registering a newborn. Selecting this scenario opens the
/// birth-registration wizard.
pub struct NewBaby;

impl ScenarioDefinition for NewBaby {
    fn id(&self) -> &str {
        BIRTH_REGISTRATION_SCENARIO
    }

    fn title(&self) -> &str {
        "I just had a baby"
    }

    fn description(&self) -> &str {
        "Register your newborn and access family services"
    }

    fn category(&self) -> ScenarioCategory {
        ScenarioCategory::LifeEvent
    }

    fn estimated_time(&self) -> &str {
        "1-2 hours"
    }

    fn questions(&self) -> &[String] {
        static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
            [
                "Where was your baby born?",
                "What is your citizenship status?",
                "What is your partner's citizenship status?",
                "Do you need to apply for child support?",
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
                    id: "birth-certificate",
                    title: "Register Birth and Get Birth Certificate",
                    description: "Official registration of your baby's birth",
                    kind: StepKind::Online,
                    estimated_time: "20 minutes",
                    priority: Priority::High,
                    dependencies: &[],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Complete birth registration online within 60 days",
                        "Provide hospital birth notification details",
                        "Choose baby's name and spelling carefully",
                        "Pay fee and order birth certificate",
                        "Certificate will arrive by mail in 5-10 business days",
                    ],
                }
                .into(),
                StepSpec {
                    id: "medicare-baby",
                    title: "Add Baby to Medicare",
                    description: "Ensure your baby has health coverage",
                    kind: StepKind::Offline,
                    estimated_time: "30 minutes",
                    priority: Priority::High,
                    dependencies: &["birth-certificate"],
                    location: Some(LocationKind::MedicareServiceCentre),
                    form_required: false,
                    instructions: &[
                        "Wait for birth certificate to arrive",
                        "Visit Medicare Service Centre with birth certificate",
                        "Bring your Medicare card and ID",
                        "Complete newborn enrollment form",
                        "Receive updated Medicare card with baby included",
                    ],
                }
                .into(),
                StepSpec {
                    id: "centrelink-baby",
                    title: "Apply for Family Tax Benefit",
                    description: "Financial assistance for families with children",
                    kind: StepKind::Online,
                    estimated_time: "30 minutes",
                    priority: Priority::Medium,
                    dependencies: &["birth-certificate"],
                    location: None,
                    form_required: true,
                    instructions: &[
                        "Create myGov account if you don't have one",
                        "Link Centrelink to your myGov account",
                        "Complete Family Tax Benefit application online",
                        "Provide birth certificate and income details",
                        "Submit application and wait for assessment",
                    ],
                }
                .into(),
            ]
        });
        &STEPS
    }
}
