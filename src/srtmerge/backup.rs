//! Moves a previous output file out of the way before it gets overwritten.
//!
//! The backup is a rename, never a copy. Its name is the output's stem, `-backup-`, the
//! local time to the second, then the output's extension:
//! `subtitles.srt` becomes `subtitles-backup-2024-03-09T14:05:31.srt`.

use crate::error::{MergeError, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Path the output at `output` would be renamed to at time `at`.
pub fn backup_name(output: &Path, at: DateTime<Local>) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = at.format(TIMESTAMP_FORMAT);

    let name = match output.extension() {
        Some(ext) => format!("{}-backup-{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}-backup-{}", stem, stamp),
    };
    output.with_file_name(name)
}

/// Renames `output` to its timestamped backup name.
///
/// Returns `Ok(None)` when there is nothing at `output`. An existing file at the backup
/// name is never replaced: that case fails with [`MergeError::BackupCollision`].
pub fn backup_if_exists(output: &Path, at: DateTime<Local>) -> Result<Option<PathBuf>> {
    match fs::symlink_metadata(output) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %output.display(), "no previous output, skipping backup");
            return Ok(None);
        }
        Err(e) => {
            return Err(MergeError::BackupFailure {
                path: output.to_path_buf(),
                source: e,
            })
        }
    }

    let target = backup_name(output, at);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(MergeError::BackupCollision(target));
    }

    match fs::rename(output, &target) {
        Ok(()) => {
            info!(from = %output.display(), to = %target.display(), "backed up previous output");
            Ok(Some(target))
        }
        // Removed between the check and the rename.
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MergeError::BackupFailure {
            path: output.to_path_buf(),
            source: e,
        }),
    }
}
