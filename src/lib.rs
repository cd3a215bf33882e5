//! fslock: host-local, cross-process file locking.
//!
//! A caller requests exclusive access to a named file and is guaranteed
//! that no other cooperating process holds the same lock concurrently,
//! with bounded wait time and deterministic cleanup. Coordination happens
//! purely through shared filesystem state, so the lock works across
//! process and language boundaries on the same host; it does not
//! coordinate across machines.
//!
//! Two exclusion layers are composed: an atomically-created sentinel file
//! (`<target>.lock`), which decides contention, and an OS advisory lock on
//! the target file, layered underneath for processes that bypass the
//! sentinel convention. See [`lock`] for the protocol and [`inspect`] for
//! operator tooling around orphaned sentinels.
//!
//! # Example
//!
//! ```no_run
//! use fslock::{FileLock, LockOptions};
//! use std::time::Duration;
//!
//! let options = LockOptions::new()
//!     .with_timeout(Duration::from_secs(2))
//!     .with_retry_delay(Duration::from_millis(100));
//! let mut lock = FileLock::with_options("report.csv", options)?;
//! {
//!     let _guard = lock.scoped()?;
//!     // exclusive access to report.csv
//! }
//! # Ok::<(), fslock::LockError>(())
//! ```

pub mod error;
pub mod inspect;
pub mod lock;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{LockError, Result};
pub use lock::{FileLock, LockOptions, ScopedLock};
