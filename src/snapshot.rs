//! Snapshot metadata.
//!
//! PHP for Windows ships a `snapshot.txt` next to `php.exe` that records (among other things) the version it was built from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Location of the snapshot file relative to an installation.
pub(crate) const SNAPSHOT_FILE: [&str; 2] = ["php", "snapshot.txt"];

// Marker preceding the version.
#[doc(hidden)]
const VERSION_MARKER: &str = "Version: ";

/// The error type for reading the snapshot metadata.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("no php found in {}, failed to read {}", .install.display(), .file.display())]
    Unreadable {
        install: PathBuf,
        file: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The snapshot file contains no version.
    #[error("no \"Version: \" line found in snapshot metadata")]
    MissingVersion,
}

/// Returns the path of the snapshot file within the given installation.
pub(crate) fn snapshot_file(install: &Path) -> PathBuf {
    SNAPSHOT_FILE.iter().fold(install.to_path_buf(), |path, part| path.join(part))
}

/// Parses the version out of the content of a snapshot file.
///
/// The version is the text following the first `Version: ` up to the end of that line.
pub(crate) fn parse_version(text: &str) -> Result<String, SnapshotError> {
    let Some((_, rest)) = text.split_once(VERSION_MARKER) else {
        return Err(SnapshotError::MissingVersion);
    };
    let line = rest.split('\n').next().unwrap_or_default();
    let version = line.trim();
    if version.is_empty() {
        return Err(SnapshotError::MissingVersion);
    }

    Ok(version.to_string())
}

/// Reads the version of the installation at the given path.
#[instrument(err(level = "debug"), level = "trace")]
pub(crate) fn read_version(install: &Path) -> Result<String, SnapshotError> {
    let file = snapshot_file(install);
    let text = match fs::read(&file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(source) => {
            return Err(SnapshotError::Unreadable {
                install: install.to_path_buf(),
                file,
                source,
            });
        }
    };

    parse_version(&text)
}
