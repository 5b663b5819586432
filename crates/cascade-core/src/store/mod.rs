//! Shared run state: container store, staging buffers and the error ledger.
//!
//! Every structure here is a plain `std::sync::Mutex` around owned data.
//! No lock is held across an `.await`, so the async runtime never parks on them.

mod containers;
mod ledger;
mod pipeline_state;
mod staging;

pub use containers::ContainerStore;
pub use ledger::{ABORT_NOTICE, CRITICAL_PREFIX, ERROR_HEADER, ErrorLedger, ErrorScan, ErrorScope};
pub use pipeline_state::PipelineState;
pub use staging::StagingBuffers;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock, recovering the data if a previous holder panicked.
///
/// Module panics are caught at the task boundary, so a poisoned lock still
/// guards consistent data: every critical section here is a single push/move.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
