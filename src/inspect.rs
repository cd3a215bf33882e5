//! Sentinel inspection and explicit clearing.
//!
//! A process that crashes without releasing leaves its sentinel file on
//! disk, and the lock itself never recovers stale sentinels automatically.
//! This module is the operator-facing side of that contract: list the
//! sentinels in a directory, report their age, and clear one explicitly
//! once the operator has decided it is orphaned. None of this runs on the
//! acquisition path.
//!
//! Sentinels are empty presence markers, so the only inspectable state is
//! the file's modification time, which for a never-written sentinel is its
//! creation time.

use crate::error::{LockError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Information about a sentinel file found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct SentinelInfo {
    /// The sentinel file path.
    pub path: PathBuf,

    /// The protected file's name (sentinel name with `.lock` stripped).
    pub name: String,

    /// When the sentinel was created, taken from the file's mtime.
    pub created_at: DateTime<Utc>,
}

impl SentinelInfo {
    /// Read sentinel information from a path on disk.
    fn from_path(path: PathBuf) -> Result<Self> {
        let metadata = fs::metadata(&path).map_err(|e| {
            LockError::UnexpectedIo(format!(
                "failed to stat sentinel '{}': {}",
                path.display(),
                e
            ))
        })?;

        let modified = metadata.modified().map_err(|e| {
            LockError::UnexpectedIo(format!(
                "failed to read mtime of sentinel '{}': {}",
                path.display(),
                e
            ))
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        Ok(Self {
            path,
            name,
            created_at: DateTime::<Utc>::from(modified),
        })
    }

    /// Calculate the age of the sentinel.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }

    /// Check if the sentinel is stale based on the given threshold in minutes.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.age().num_minutes() > stale_minutes as i64
    }
}

impl std::fmt::Display for SentinelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (age: {})", self.name, self.age_string())
    }
}

/// List all sentinel files in a directory.
///
/// Entries without a `.lock` extension are skipped. A missing directory
/// yields an empty list. Results are sorted by name for consistent output.
pub fn list_sentinels(dir: &Path) -> Result<Vec<SentinelInfo>> {
    let mut sentinels = Vec::new();

    if !dir.exists() {
        return Ok(sentinels);
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        LockError::UnexpectedIo(format!(
            "failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            LockError::UnexpectedIo(format!("failed to read directory entry: {}", e))
        })?;

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("lock") {
            continue;
        }

        // A sentinel can be released between read_dir and the stat; skip
        // entries that are no longer readable rather than failing the scan.
        match SentinelInfo::from_path(path) {
            Ok(info) => sentinels.push(info),
            Err(_) => continue,
        }
    }

    sentinels.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(sentinels)
}

/// Clear a sentinel file by the name of the file it protects.
///
/// The caller is responsible for deciding that the sentinel is actually
/// orphaned; clearing one whose owner is still alive breaks mutual
/// exclusion for that owner.
///
/// Returns information about the cleared sentinel for audit purposes.
pub fn clear_sentinel(dir: &Path, name: &str) -> Result<SentinelInfo> {
    let path = dir.join(format!("{}.lock", name));

    if !path.exists() {
        return Err(LockError::UnexpectedIo(format!(
            "sentinel for '{}' does not exist at: {}",
            name,
            path.display()
        )));
    }

    let info = SentinelInfo::from_path(path.clone())?;

    fs::remove_file(&path).map_err(|e| {
        LockError::UnexpectedIo(format!(
            "failed to clear sentinel '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(info)
}
