//! php.ini.
//!
//! The `php.ini` shipped in the portable archive refers to the archive-relative root `\xampp`.
//! Before such an installation is stored, these references are pointed at the active installation.

use crate::terminal;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{instrument, trace};

/// Location of `php.ini` relative to an installation.
pub(crate) const PHP_INI_FILE: [&str; 2] = ["php", "php.ini"];

// Archive-relative root used by the portable archive.
#[doc(hidden)]
const PLACEHOLDER: &str = r"\xampp";

/// Replaces the placeholder root after a space or a double quote with the given path.
pub(crate) fn rewrite_text(text: &str, xampp_path: &str) -> String {
    text.replace(&format!(" {PLACEHOLDER}"), &format!(" {xampp_path}"))
        .replace(&format!("\"{PLACEHOLDER}"), &format!("\"{xampp_path}"))
}

/// Rewrites `php/php.ini` of the installation at the given path.
#[instrument(err, level = "trace")]
pub(crate) fn rewrite(install: &Path, xampp_path: &str) -> anyhow::Result<()> {
    let file = PHP_INI_FILE.iter().fold(install.to_path_buf(), |path, part| path.join(part));
    let bytes = fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let rewritten = rewrite_text(&text, xampp_path);
    trace!(changed = rewritten != text);
    fs::write(&file, rewritten).with_context(|| format!("failed to write {}", file.display()))?;

    terminal::info("php.ini formatted.");
    Ok(())
}
