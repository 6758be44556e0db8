use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("chat endpoint returned status {status}")]
    Status { status: u16 },

    #[error("chat reply has no 'message' field")]
    MissingMessage,

    #[error("failed to decode chat reply: {0}")]
    Decode(String),

    #[error("chat request timed out")]
    Timeout,

    #[error("transport config error: {0}")]
    Config(String),
}
