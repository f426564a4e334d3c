//! Commands.
//!
//! This module contains the operations behind the individual commands.

use crate::colors::*;
use crate::config::*;
use crate::download::{self, Fetch};
use crate::extract::Extract;
use crate::home::Home;
use crate::snapshot::SnapshotError;
use crate::store::VersionStore;
use crate::terminal::{self, set_window_title};
use crate::util::clear_dir;
use anyhow::{Context, anyhow};
use std::fmt;
use std::fs;
use std::io;
use std::path::{self, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Versions suggested for download.
pub(crate) const POPULAR_VERSIONS: [&str; 4] = ["8.2.0", "8.1.12", "8.0.25", "7.4.33"];

/// Usage printed by `help`.
pub(crate) const USAGE: &str = "\
peach setup              <- create workplace !needed.
peach xampp <path>       <- set xampp folder path !needed.
peach phps <path>        <- set php_versions folder (optional).
peach info               <- show setup state and configured paths.
peach list               <- list of your php versions.
peach load <version>     <- load version (see peach list). Also saves current version.
peach download <version> <- download version from the internet.
peach help               <- show this help.";

/// Creates the versions folder and the temp workspace and writes the default configuration.
#[instrument(err, level = "trace")]
pub(crate) fn setup(home: &Home) -> anyhow::Result<Config> {
    let php_versions = home.default_php_versions_dir();
    fs::create_dir_all(&php_versions).with_context(|| format!("failed to create {}", php_versions.display()))?;
    let temps = home.temps_dir();
    fs::create_dir_all(&temps).with_context(|| format!("failed to create {}", temps.display()))?;

    let config = Config::with_defaults(&php_versions);
    config.save_to_file(home.config_file())?;
    terminal::info(format!("Workplace created at {}.", PATH_COLOR.paint(home.dir().to_string_lossy())));

    Ok(config)
}

/// The state reported by `info`.
#[derive(Debug, PartialEq)]
pub(crate) struct Info {
    /// Whether both `config.json` and the versions folder exist.
    pub(crate) set_up: bool,
    /// The versions folder, `None` if it is the default one.
    pub(crate) php_versions: Option<PathBuf>,
    /// The configured active installation.
    pub(crate) xampp: String,
}

/// Collects the state reported by `info`.
#[instrument(err, level = "trace")]
pub(crate) fn info(home: &Home, config: &Config) -> io::Result<Info> {
    let config_exists = home.config_file().try_exists()?;
    let php_versions_exists = config.php_versions_dir().try_exists()?;
    let php_versions = config.php_versions_dir();
    let php_versions = (php_versions != home.default_php_versions_dir()).then_some(php_versions);

    Ok(Info {
        set_up: config_exists && php_versions_exists,
        php_versions,
        xampp: config.xampp_path.clone(),
    })
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = INFO_COLOR.paint("[info]");
        let set_up = if self.set_up { "YES" } else { "NO" };
        writeln!(f, "{prefix} Set up: {set_up}")?;
        match &self.php_versions {
            Some(path) => writeln!(f, "{prefix} Php versions folder: {}", PATH_COLOR.paint(path.to_string_lossy()))?,
            None => writeln!(f, "{prefix} Php versions folder: DEFAULT")?,
        }
        write!(f, "{prefix} XAMPP folder path: {}", PATH_COLOR.paint(&self.xampp))
    }
}

/// The versions reported by `list`.
#[derive(Debug)]
pub(crate) struct Listing {
    /// The version of the active installation.
    pub(crate) current: Result<String, SnapshotError>,
    /// The versions in the versions folder.
    pub(crate) loaded: io::Result<Vec<String>>,
}

/// Collects the versions reported by `list`.
pub(crate) fn list(config: &Config) -> Listing {
    let store = VersionStore::new(config);
    let current = store.current();
    if let Err(err) = &current {
        debug!(?err, "no active version");
    }

    Listing {
        current,
        loaded: store.loaded(),
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current version:")?;
        match &self.current {
            Ok(version) => writeln!(f, "\t{}", VERSION_COLOR.paint(version))?,
            Err(_) => writeln!(f, "\t{} Invalid xampp path in config.", WARN_COLOR.paint("[warn]"))?,
        }

        writeln!(f, "Has been loaded:")?;
        match &self.loaded {
            Ok(versions) => {
                for version in versions {
                    writeln!(f, "\t{}", VERSION_COLOR.paint(version))?;
                }
            }
            Err(err) => writeln!(f, "\t{} Failed to read php versions folder: {err}", WARN_COLOR.paint("[warn]"))?,
        }

        writeln!(f, "Popular versions for download:")?;
        for (i, version) in POPULAR_VERSIONS.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "\t{version}")?;
        }

        Ok(())
    }
}

/// Downloads, extracts and stores the given version.
///
/// The temp workspace is cleared before and after. A failing stage aborts before the next one runs.
#[instrument(err, level = "trace", skip(fetcher, extractor))]
pub(crate) fn download(home: &Home, config: &Config, version: &str, fetcher: &dyn Fetch, extractor: &dyn Extract) -> anyhow::Result<()> {
    let start = Instant::now();
    let temps = home.temps_dir();
    clear_dir(&temps).with_context(|| format!("failed to clear {}", temps.display()))?;

    set_window_title(&format!("peach: downloading PHP {version}"));
    terminal::info("Downloading...");
    let archive = home.archive_file();
    download::download_php_version(fetcher, version, &archive)?;

    set_window_title(&format!("peach: extracting PHP {version}"));
    terminal::info("Extracting...");
    extractor.extract(&archive, &temps)?;

    terminal::info("Saving version...");
    let store = VersionStore::new(config);
    let saved = store.save(&home.extracted_dir(), true)?;
    if saved != version {
        warn!(%saved, version, "downloaded version differs");
        terminal::warn(format!("Requested PHP {version}, but the archive contains PHP {saved}."));
    }

    terminal::info("Clearing temps...");
    clear_dir(&temps).with_context(|| format!("failed to clear {}", temps.display()))?;

    set_window_title("peach");
    terminal::info(format!("Done in {}!", format_elapsed(start.elapsed())));
    Ok(())
}

/// Makes the given version the active one.
pub(crate) fn load(config: &Config, version: &str) -> anyhow::Result<()> {
    VersionStore::new(config).load(version)
}

/// Sets the path of the active installation.
#[instrument(err, level = "trace")]
pub(crate) fn set_xampp(home: &Home, config: &Config, path: &str) -> anyhow::Result<Config> {
    let path = existing_path(path)?;
    let config = Config {
        xampp_path: path,
        ..config.clone()
    };
    config.save_to_file(home.config_file())?;
    terminal::info(format!("XAMPP folder path set to {}.", PATH_COLOR.paint(&config.xampp_path)));

    Ok(config)
}

/// Sets the path of the versions folder.
#[instrument(err, level = "trace")]
pub(crate) fn set_phps(home: &Home, config: &Config, path: &str) -> anyhow::Result<Config> {
    let path = existing_path(path)?;
    let config = Config {
        php_versions_folder_path: path,
        ..config.clone()
    };
    config.save_to_file(home.config_file())?;
    terminal::info(format!("Php versions folder set to {}.", PATH_COLOR.paint(&config.php_versions_folder_path)));

    Ok(config)
}

// Expands `~` and environment variables, makes the path absolute and checks that it exists.
#[doc(hidden)]
fn existing_path(path: &str) -> anyhow::Result<String> {
    let expanded = shellexpand::full(path).map_err(|err| anyhow!("invalid path {path}: {err}"))?;
    let expanded = PathBuf::from(expanded.as_ref());
    let expanded = path::absolute(&expanded).unwrap_or(expanded);
    if !expanded.try_exists()? {
        return Err(anyhow!("invalid path {path}"));
    }

    Ok(expanded.to_string_lossy().into_owned())
}

// Formats the elapsed time with a resolution of seconds.
#[doc(hidden)]
fn format_elapsed(elapsed: Duration) -> String {
    let elapsed = Duration::from_secs(elapsed.as_secs());
    humantime::format_duration(elapsed).to_string()
}
