use thiserror::Error;

/// Contract violations detected at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    #[error("Invalid board shape: {0}")]
    InvalidBoardShape(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
