//! Lock configuration options.

use crate::error::{LockError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default maximum wall-clock time to wait for acquisition.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default sleep interval between acquisition attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Configuration for lock acquisition behavior.
///
/// All fields are explicit so behavior stays deterministic under test:
/// the containing directory is a parameter threaded through construction,
/// not ambient process state.
#[derive(Debug, Clone)]
pub struct LockOptions {
    /// Maximum wall-clock time to wait for acquisition. `None` means
    /// fail immediately when the lock is unavailable.
    pub timeout: Option<Duration>,

    /// Sleep interval between acquisition attempts. Required whenever a
    /// timeout is set.
    pub retry_delay: Option<Duration>,

    /// Directory containing the target file and its sentinel. `None`
    /// resolves to the current working directory at construction time.
    pub directory: Option<PathBuf>,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            retry_delay: Some(DEFAULT_RETRY_DELAY),
            directory: None,
        }
    }
}

impl LockOptions {
    /// Create options with the default timeout and retry delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acquisition timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable waiting: acquisition fails immediately on contention.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the delay between acquisition attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Set the directory containing the target file and its sentinel.
    pub fn in_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Validate the option combination.
    ///
    /// A timeout with no retry delay would spin without sleeping, so it is
    /// rejected as a configuration error before any file I/O happens.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout.is_some() && self.retry_delay.is_none() {
            return Err(LockError::Configuration(
                "a retry delay must be set whenever a timeout is set".to_string(),
            ));
        }
        Ok(())
    }
}
