use thiserror::Error;

/// The answer did not fit any alternative of the command being asked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sorry, I don't understand.")]
pub struct VerificationFailure;

/// Reasons a session snapshot could not be restored.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown intent label: {0}")]
    UnknownIntent(String),

    #[error("unknown command name: {0}")]
    UnknownCommand(String),

    #[error("unknown value name: {0}")]
    UnknownValue(String),

    #[error("unknown dialogue state: {0}")]
    UnknownState(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}
