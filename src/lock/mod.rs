//! Locking subsystem for fslock.
//!
//! This module implements the layered cross-process lock:
//! - Sentinel file (`<target>.lock`) created with **create_new** semantics
//!   (exclusive create) so that exactly one process can acquire a given
//!   lock at a time.
//! - Exclusive advisory lock on the open target file, layered on top for
//!   processes that skip the sentinel convention.
//!
//! # Acquisition
//!
//! `acquire` is a blocking poll-and-sleep loop: contention is retried every
//! `retry_delay` until `timeout` elapses (wall-clock, measured from the
//! start of the call). With no timeout configured, contention fails
//! immediately. Every non-contention failure is surfaced without retry.
//!
//! # Release
//!
//! `release` is idempotent and never fails: it closes the sentinel
//! descriptor, unlinks the sentinel, then releases the advisory lock and
//! closes the target. A [`ScopedLock`] guard releases automatically at end
//! of scope, and `Drop` on the handle is a last-resort safety net against
//! orphaned sentinels.

mod guard;
mod handle;
mod options;


// Re-export public API
pub use guard::ScopedLock;
pub use handle::FileLock;
pub use options::{DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, LockOptions};
