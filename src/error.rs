use thiserror::Error;
use uuid::Uuid;

/// Request-level failures. Component-level scoring faults never surface here;
/// they are absorbed as the component's neutral default.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("store unavailable: {0}")]
    StoreUnavailable(anyhow::Error),
}

impl From<anyhow::Error> for EngineError {
    fn from(err: anyhow::Error) -> Self {
        EngineError::StoreUnavailable(err)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
