use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("no conversation is open")]
    NotOpen,

    #[error("unknown roadmap step: {0}")]
    UnknownStep(String),

    #[error("step '{0}' has no form")]
    NoForm(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("field '{0}' is not shown for the current answers")]
    HiddenField(String),

    #[error("'{value}' is not valid for field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("the question flow is complete")]
    FlowComplete,

    #[error("'{value}' is not an option for field '{field}'")]
    InvalidOption { field: String, value: String },

    #[error("step '{0}' is not done in person")]
    NoLocation(String),

    #[error("a question is already waiting for an answer")]
    QuestionPending,

    #[error("the answer must not be empty")]
    EmptyAnswer,

    #[error("the form has already been submitted")]
    AlreadySubmitted,

    #[error("not available in the current view")]
    WrongView,

    #[error(transparent)]
    Core(#[from] servicechat_core::error::CoreError),

    #[error("invalid map link: {0}")]
    MapLink(#[from] url::ParseError),
}
