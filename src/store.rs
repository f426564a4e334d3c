//! Version store.
//!
//! This module contains the code to swap the `php` and `apache` folders of a XAMPP installation
//! in and out of the versions folder.
//!
//! Every move is recorded in a [`Journal`] so a failed swap can be rolled back.

use crate::colors::*;
use crate::config::Config;
use crate::phpini;
use crate::snapshot::{self, SnapshotError};
use crate::terminal;
use anyhow::Context;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, instrument, trace, warn};

/// The folders that make up a version, with the label used in console messages.
pub(crate) const SWAPPED_DIRS: [(&str, &str); 2] = [("php", "PHP"), ("apache", "Apache")];

/// The error type for swapping versions.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SwapError {
    /// The requested version is not in the versions folder.
    #[error("version {0} isn't found")]
    UnknownVersion(String),
    /// The requested version lacks one of its folders.
    #[error("version {version} is incomplete, {} is missing", .missing.display())]
    Incomplete { version: String, missing: PathBuf },
    /// The configured active installation does not exist.
    #[error("invalid xampp path {}", .0.display())]
    InvalidXamppPath(PathBuf),
    /// The requested version is the active one.
    #[error("version {0} is already loaded")]
    AlreadyActive(String),
    /// The version reported by the snapshot metadata can't be used as folder name.
    #[error("version {0:?} can't be used as folder name")]
    InvalidVersionName(String),
    /// A folder could not be moved.
    #[error("failed to move {} to {}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

// Journal of the renames performed so far.
#[derive(Debug, Default)]
struct Journal {
    done: Vec<(PathBuf, PathBuf)>,
}

impl Journal {
    // Renames `from` to `to` and records it.
    fn rename(&mut self, from: &Path, to: &Path) -> Result<(), SwapError> {
        trace!(from = %from.display(), to = %to.display(), "rename");
        fs::rename(from, to).map_err(|source| SwapError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
        self.done.push((from.to_path_buf(), to.to_path_buf()));

        Ok(())
    }

    // Reverts all recorded renames, latest first.
    fn undo(self) {
        for (from, to) in self.done.into_iter().rev() {
            debug!(from = %to.display(), to = %from.display(), "undo rename");
            if let Err(err) = fs::rename(&to, &from) {
                error!(?err, "failed to move {} back to {}", to.display(), from.display());
            }
        }
    }
}

/// The versions folder together with the active installation it serves.
#[derive(Debug)]
pub(crate) struct VersionStore<'a> {
    config: &'a Config,
}

impl<'a> VersionStore<'a> {
    /// Creates a new `VersionStore` for the given configuration.
    pub(crate) fn new(config: &'a Config) -> Self {
        Self { config }
    }

    // The folder of the given version.
    fn version_dir(&self, version: &str) -> PathBuf {
        self.config.php_versions_dir().join(version)
    }

    /// Returns the names of all versions in the versions folder.
    ///
    /// Semantic versions come first in ascending order, everything else after them sorted by name.
    pub(crate) fn loaded(&self) -> io::Result<Vec<String>> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(self.config.php_versions_dir())? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                versions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        versions.sort_by(|a, b| compare_versions(a, b));

        Ok(versions)
    }

    /// Returns the version of the active installation.
    pub(crate) fn current(&self) -> Result<String, SnapshotError> {
        snapshot::read_version(&self.config.xampp_dir())
    }

    /// Moves the installation at `source` into the versions folder and returns its version.
    ///
    /// With `rewrite_ini`, `php.ini` is pointed at the active installation first.
    /// An already stored folder for the same version is replaced.
    #[instrument(err, level = "trace", skip(self))]
    pub(crate) fn save(&self, source: &Path, rewrite_ini: bool) -> anyhow::Result<String> {
        let version = snapshot::read_version(source).context("no php found, can't save")?;
        if !is_single_component(&version) {
            return Err(SwapError::InvalidVersionName(version).into());
        }

        if rewrite_ini {
            phpini::rewrite(source, &self.config.xampp_path).context("format php.ini error")?;
        }

        let dest = self.version_dir(&version);
        if dest.try_exists()? {
            terminal::warn(format!("Version {version} is already in php_versions folder, it'll be overwritten."));
            fs::remove_dir_all(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
        }
        fs::create_dir(&dest).with_context(|| format!("failed to create {}", dest.display()))?;

        let mut journal = Journal::default();
        for (name, label) in SWAPPED_DIRS {
            if let Err(err) = journal.rename(&source.join(name), &dest.join(name)) {
                journal.undo();
                let _ = fs::remove_dir(&dest);
                return Err(err.into());
            }
            terminal::info(format!("{label} saved. PHP {}", VERSION_COLOR.paint(&version)));
        }

        Ok(version)
    }

    /// Makes the given version the active one.
    ///
    /// The currently active version (if there is one) is saved first. If moving the requested
    /// version into place fails, all moves are reverted and the saved version is restored.
    #[instrument(err, level = "trace", skip(self))]
    pub(crate) fn load(&self, version: &str) -> anyhow::Result<()> {
        let source = self.version_dir(version);
        if !source.try_exists()? {
            return Err(SwapError::UnknownVersion(version.to_string()).into());
        }
        for (name, _) in SWAPPED_DIRS {
            let missing = source.join(name);
            if !missing.is_dir() {
                return Err(SwapError::Incomplete {
                    version: version.to_string(),
                    missing,
                }
                .into());
            }
        }

        let xampp = self.config.xampp_dir();
        if !xampp.is_dir() {
            return Err(SwapError::InvalidXamppPath(xampp).into());
        }

        // save the active version, unless the installation is empty
        let saved = if SWAPPED_DIRS.iter().any(|(name, _)| xampp.join(name).exists()) {
            let current = snapshot::read_version(&xampp).context("no php in xampp, can't save")?;
            if current == version {
                return Err(SwapError::AlreadyActive(current).into());
            }
            Some(self.save(&xampp, false)?)
        } else {
            debug!(xampp = %xampp.display(), "nothing to save");
            None
        };

        let mut journal = Journal::default();
        for (name, label) in SWAPPED_DIRS {
            if let Err(err) = journal.rename(&source.join(name), &xampp.join(name)) {
                journal.undo();
                if let Some(saved) = &saved {
                    self.restore(saved, &xampp);
                }
                return Err(anyhow::Error::new(err).context(format!("failed to load PHP {version}, changes were rolled back")));
            }
            terminal::info(format!("{label} loaded. PHP {}", VERSION_COLOR.paint(version)));
        }

        if let Err(err) = fs::remove_dir(&source) {
            warn!(?err, "failed to remove {}", source.display());
        }

        Ok(())
    }

    // Moves a previously saved version back into the active installation.
    fn restore(&self, version: &str, xampp: &Path) {
        let dir = self.version_dir(version);
        let mut journal = Journal::default();
        for (name, _) in SWAPPED_DIRS {
            if let Err(err) = journal.rename(&dir.join(name), &xampp.join(name)) {
                error!(?err, "failed to restore PHP {version}");
                terminal::warn(format!("PHP {version} could not be restored, check {}", PATH_COLOR.paint(dir.to_string_lossy())));
                return;
            }
        }
        let _ = fs::remove_dir(&dir);
        terminal::info(format!("PHP {} restored.", VERSION_COLOR.paint(version)));
    }
}

// Orders semantic versions numerically before anything else.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

// Whether the given name is exactly one normal path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
