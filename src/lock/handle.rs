//! The lock handle: construction, acquisition, and release.

use super::guard::ScopedLock;
use super::options::LockOptions;
use crate::error::{LockError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// A cross-process lock on a named target file.
///
/// Two independent exclusion layers are composed:
/// 1. A sentinel file at `<directory>/<file_name>.lock`, created with
///    exclusive (create-new) semantics. Creation is a single kernel-level
///    operation, so exactly one of any set of racing processes wins.
/// 2. An exclusive advisory lock on the already-open target file, for
///    processes that bypass the sentinel convention but honor advisory
///    locking.
///
/// The sentinel decides contention; the advisory lock is layered defense.
/// It is requested only after the sentinel is won, and that ordering is
/// part of the observable contract (see [`FileLock::acquire`]).
#[derive(Debug)]
pub struct FileLock {
    /// Name of the protected file, relative to the containing directory.
    file_name: String,

    /// Full path to the protected file.
    target_path: PathBuf,

    /// Full path to the sentinel file (`<target>.lock`).
    sentinel_path: PathBuf,

    /// Maximum wall-clock time to wait for acquisition.
    timeout: Option<Duration>,

    /// Sleep interval between acquisition attempts.
    retry_delay: Option<Duration>,

    /// Open handle to the target file. Holds the advisory lock while
    /// locked; taken (closed) on release, after which the handle is spent.
    target: Option<File>,

    /// Handle returned by exclusive sentinel creation; closed on release.
    sentinel: Option<File>,

    /// True iff this handle holds both the sentinel and the advisory lock.
    locked: bool,
}

impl FileLock {
    /// Create a handle for `file_name` with default options: 10s timeout,
    /// 50ms retry delay, current working directory.
    ///
    /// Opens the target file for read/write immediately; failure here is a
    /// setup error ([`LockError::Open`]), distinct from contention. No
    /// lock is taken yet.
    pub fn new(file_name: &str) -> Result<Self> {
        Self::with_options(file_name, LockOptions::default())
    }

    /// Create a handle with explicit options.
    ///
    /// Option validation happens before any file I/O, so an invalid
    /// combination (timeout without retry delay) is reported as
    /// [`LockError::Configuration`] even when the target file is missing.
    pub fn with_options(file_name: &str, options: LockOptions) -> Result<Self> {
        options.validate()?;

        let directory = match options.directory {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(|e| {
                LockError::Open(format!("failed to resolve working directory: {}", e))
            })?,
        };

        let target_path = directory.join(file_name);
        let sentinel_path = directory.join(format!("{}.lock", file_name));

        let target = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&target_path)
            .map_err(|e| LockError::Open(format!("'{}': {}", target_path.display(), e)))?;

        Ok(Self {
            file_name: file_name.to_string(),
            target_path,
            sentinel_path,
            timeout: options.timeout,
            retry_delay: options.retry_delay,
            target: Some(target),
            sentinel: None,
            locked: false,
        })
    }

    /// Whether this handle currently holds the lock.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Path to the protected target file.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Path to the sentinel file.
    pub fn sentinel_path(&self) -> &Path {
        &self.sentinel_path
    }

    /// Acquire the lock, retrying on contention until the configured
    /// timeout elapses.
    ///
    /// Each attempt tries to create the sentinel exclusively. On success
    /// the handle is marked locked and an exclusive advisory lock is
    /// requested on the target descriptor. On contention (the sentinel
    /// already exists) the call fails immediately with
    /// [`LockError::Unavailable`] when no timeout is configured, fails
    /// with [`LockError::Timeout`] once the timeout has elapsed, and
    /// otherwise sleeps for the retry delay and tries again. Any other
    /// filesystem error is surfaced as [`LockError::UnexpectedIo`] without
    /// retry.
    ///
    /// The timeout is measured from the start of this call and is not
    /// reset by individual retries. No fairness among waiters is provided.
    ///
    /// If the advisory-lock request fails after the sentinel was won, the
    /// error is surfaced with the handle still marked locked; a single
    /// [`release`](FileLock::release) recovers the partial state.
    pub fn acquire(&mut self) -> Result<()> {
        if self.target.is_none() {
            return Err(LockError::UnexpectedIo(format!(
                "handle for '{}' was already released; construct a new FileLock",
                self.file_name
            )));
        }

        let start = Instant::now();
        loop {
            match OpenOptions::new()
                .read(true)
                .write(true)
                .create_new(true)
                .open(&self.sentinel_path)
            {
                Ok(sentinel) => {
                    self.sentinel = Some(sentinel);
                    self.locked = true;

                    // Layered defense only: taken after the sentinel race is
                    // already decided, so it never arbitrates contention
                    // between sentinel-honoring processes. Do not reorder.
                    if let Some(target) = self.target.as_ref() {
                        target.lock_exclusive().map_err(|e| {
                            LockError::UnexpectedIo(format!(
                                "advisory lock on '{}': {}",
                                self.target_path.display(),
                                e
                            ))
                        })?;
                    }

                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    let Some(timeout) = self.timeout else {
                        return Err(LockError::Unavailable(format!(
                            "could not acquire lock on '{}'",
                            self.file_name
                        )));
                    };

                    if start.elapsed() >= timeout {
                        return Err(LockError::Timeout(format!(
                            "gave up on '{}' after {:.3}s",
                            self.file_name,
                            start.elapsed().as_secs_f64()
                        )));
                    }

                    // Validation guarantees a delay is present when a
                    // timeout is set.
                    if let Some(delay) = self.retry_delay {
                        thread::sleep(delay);
                    }
                }
                Err(e) => {
                    return Err(LockError::UnexpectedIo(format!(
                        "creating sentinel '{}': {}",
                        self.sentinel_path.display(),
                        e
                    )));
                }
            }
        }
    }

    /// Release the lock. Idempotent: a no-op when not locked.
    ///
    /// Steps, in order: close the sentinel descriptor, delete the sentinel
    /// file, clear the locked flag, release the advisory lock, close the
    /// target descriptor. Deletion is the step that frees the name, so no
    /// other process can win sentinel creation until it completes.
    ///
    /// This is also the drop and unwind path, so it never returns an
    /// error and never panics; cleanup failures are reported as stderr
    /// warnings.
    pub fn release(&mut self) {
        if !self.locked {
            return;
        }

        // Closes the sentinel descriptor.
        self.sentinel.take();

        if let Err(e) = fs::remove_file(&self.sentinel_path) {
            eprintln!(
                "Warning: failed to remove sentinel '{}': {}",
                self.sentinel_path.display(),
                e
            );
        }

        self.locked = false;

        if let Some(target) = self.target.take() {
            if let Err(e) = FileExt::unlock(&target) {
                eprintln!(
                    "Warning: failed to release advisory lock on '{}': {}",
                    self.target_path.display(),
                    e
                );
            }
            // Dropping `target` closes the descriptor.
        }
    }

    /// Acquire the lock (if not already held) and return a guard that
    /// releases it when dropped, including on unwind.
    pub fn scoped(&mut self) -> Result<ScopedLock<'_>> {
        if !self.locked {
            self.acquire()?;
        }
        Ok(ScopedLock::new(self))
    }
}

/// Safety net against orphaned sentinel files: a handle discarded while
/// still locked releases on teardown. Not a substitute for an explicit
/// `release` or a scoped guard when release timing matters.
impl Drop for FileLock {
    fn drop(&mut self) {
        self.release();
    }
}
