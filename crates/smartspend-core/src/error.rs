use smartspend_domain::{EntityId, UnknownCategory};
use thiserror::Error;

use crate::session::{SessionEvent, SessionState};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Budget not found: {0}")]
    BudgetNotFound(EntityId),
    #[error("Budget {0} is not active")]
    BudgetInactive(EntityId),
    #[error("Goal not found: {0}")]
    GoalNotFound(EntityId),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Cannot apply {event:?} while in {state}")]
    InvalidTransition {
        state: SessionState,
        event: SessionEvent,
    },
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Classifier error: {0}")]
    Classifier(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownCategory> for CoreError {
    fn from(err: UnknownCategory) -> Self {
        CoreError::Validation(err.to_string())
    }
}
