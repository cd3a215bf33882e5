//! RAII scoped-lock guard.

use super::handle::FileLock;
use std::path::Path;

/// RAII guard for a held [`FileLock`].
///
/// Returned by [`FileLock::scoped`]. When dropped, the lock is released if
/// still held, whether the scope exits normally or by unwinding. Release
/// failures are reported as warnings but never panic.
#[derive(Debug)]
pub struct ScopedLock<'a> {
    handle: &'a mut FileLock,
}

impl<'a> ScopedLock<'a> {
    pub(super) fn new(handle: &'a mut FileLock) -> Self {
        Self { handle }
    }

    /// Path to the sentinel file held by this guard.
    pub fn sentinel_path(&self) -> &Path {
        self.handle.sentinel_path()
    }

    /// Path to the protected target file.
    pub fn target_path(&self) -> &Path {
        self.handle.target_path()
    }

    /// Release the lock before the end of the scope.
    pub fn release(self) {
        // Drop does the work.
    }
}

impl Drop for ScopedLock<'_> {
    fn drop(&mut self) {
        if self.handle.is_locked() {
            self.handle.release();
        }
    }
}
