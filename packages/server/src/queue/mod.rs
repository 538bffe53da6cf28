//! Work queues drained by the autopilot jobs.
//!
//! A queue hands out claimed items; a claimed item is invisible to every other
//! claimer until it is marked done or failed, or its claim is released.

mod error;
mod price_sync;
mod traits;

pub use error::QueueError;
pub use price_sync::{NewPriceChange, SeaOrmPriceSyncQueue, price_sync_queue};
pub use traits::WorkQueue;
