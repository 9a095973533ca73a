/// Failure kinds shared by every backend and the state container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl EngineError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable(detail.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
