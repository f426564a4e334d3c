//! Util.
//!
//! This module contains file-system helpers that don't fit elsewhere.

use std::fs;
use std::io;
use std::path::Path;

/// Removes the given directory (if present) and recreates it empty.
pub(crate) fn clear_dir(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::create_dir_all(path)
}
