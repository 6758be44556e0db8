use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("duplicate scenario id: {0}")]
    DuplicateScenario(String),

    #[error("invalid scenario id: {0}")]
    InvalidScenarioId(#[from] servicechat_core::error::CoreError),

    #[error("scenario '{scenario_id}' has no questions")]
    NoQuestions { scenario_id: String },

    #[error("duplicate step '{step_id}' in scenario '{scenario_id}'")]
    DuplicateStep {
        scenario_id: String,
        step_id: String,
    },

    #[error("step '{step_id}' in scenario '{scenario_id}' depends on unknown or later step '{dependency}'")]
    BadDependency {
        scenario_id: String,
        step_id: String,
        dependency: String,
    },

    #[error("step '{step_id}' has an unparseable time estimate '{estimate}'")]
    BadEstimate { step_id: String, estimate: String },

    #[error("form template for '{step_id}' has duplicate field '{field_id}'")]
    DuplicateField { step_id: String, field_id: String },

    #[error("form template '{step_id}' does not belong to any form-required step")]
    OrphanTemplate { step_id: String },

    #[error("select field '{field_id}' in form '{step_id}' has no options")]
    EmptyOptions { step_id: String, field_id: String },
}
