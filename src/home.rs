//! Home.
//!
//! This module contains the layout of the directory `peach` works in (by default the directory of the executable).

use crate::config::CONFIG_FILENAME;
use anyhow::Context;
use std::path::{self, Path, PathBuf};

/// Name of the default versions folder.
pub(crate) const PHP_VERSIONS_DIR: &str = "php_versions";

/// Name of the temp workspace.
pub(crate) const TEMPS_DIR: &str = "temps";

/// Name of the downloaded archive within the temp workspace.
pub(crate) const ARCHIVE_FILENAME: &str = "downloaded_version.7z";

/// Name of the top-level folder inside the portable archive.
pub(crate) const ARCHIVE_ROOT_DIR: &str = "xampp";

/// The home directory and everything derived from it.
#[derive(Clone, Debug)]
pub(crate) struct Home {
    dir: PathBuf,
}

impl Home {
    /// Creates a new `Home` for the given directory.
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let dir = path::absolute(&dir).unwrap_or(dir);
        Self { dir }
    }

    /// Resolves the home directory: the given override or the directory of the running executable.
    pub(crate) fn resolve(dir: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(dir) = dir {
            return Ok(Self::new(dir));
        }

        let exe = std::env::current_exe().context("failed to determine the path of the executable")?;
        let Some(dir) = exe.parent() else {
            anyhow::bail!("failed to determine the directory of {}", exe.display());
        };

        Ok(Self::new(dir))
    }

    /// The home directory itself.
    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to `config.json`.
    pub(crate) fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILENAME)
    }

    /// Path to the default versions folder.
    pub(crate) fn default_php_versions_dir(&self) -> PathBuf {
        self.dir.join(PHP_VERSIONS_DIR)
    }

    /// Path to the temp workspace.
    pub(crate) fn temps_dir(&self) -> PathBuf {
        self.dir.join(TEMPS_DIR)
    }

    /// Path the archive gets downloaded to.
    pub(crate) fn archive_file(&self) -> PathBuf {
        self.temps_dir().join(ARCHIVE_FILENAME)
    }

    /// Path of the extracted installation.
    pub(crate) fn extracted_dir(&self) -> PathBuf {
        self.temps_dir().join(ARCHIVE_ROOT_DIR)
    }
}
