use sea_orm::DbErr;

use crate::queue::QueueError;

/// Failure of a whole autopilot operation.
///
/// Per-item and per-rule failures never surface here; they are recorded on
/// the item or in the action log and the operation carries on.
#[derive(Debug, thiserror::Error)]
pub enum AutopilotError {
    #[error("no authenticated tenant")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),

    #[error(transparent)]
    Queue(#[from] QueueError),
}
