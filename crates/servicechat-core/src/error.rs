use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("response index {index} out of range (have {len})")]
    ResponseIndex { index: usize, len: usize },

    #[error("invalid scenario id: {0}")]
    InvalidScenarioId(String),
}
