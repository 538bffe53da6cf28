use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue storage error: {0}")]
    Storage(#[from] DbErr),

    /// The item is no longer claimed by this run, e.g. its claim timed out and
    /// was released.
    #[error("claim on queue entry {id} was lost")]
    ClaimLost { id: Uuid },
}
