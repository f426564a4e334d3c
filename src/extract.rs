//! Extract.
//!
//! This module contains the code to unpack a downloaded archive with an external archive tool.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, instrument, trace};

/// The default archive tool.
pub(crate) const DEFAULT_SEVEN_ZIP: &str = "7z";

/// The error type for extracting an archive.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ExtractError {
    /// The archive tool could not be started.
    #[error("failed to run {program}, check that you have 7-Zip on this machine")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The archive tool reported a failure.
    #[error("extracting failed ({status}), maybe the archive is corrupted. Also check that you have 7-Zip on this machine")]
    Failed { status: std::process::ExitStatus },
}

/// Something that can unpack an archive into a directory.
pub(crate) trait Extract {
    /// Unpacks `archive` into `dest`.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError>;
}

/// [`Extract`] implementation running the 7-Zip command-line tool.
#[derive(Debug)]
pub(crate) struct SevenZip {
    program: String,
}

impl SevenZip {
    /// Creates a new `SevenZip` running the given program.
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    // Builds the command line: `<program> x <archive> -o<dest>`.
    fn command(&self, archive: &Path, dest: &Path) -> Command {
        let mut output_flag = OsString::from("-o");
        output_flag.push(dest);

        let mut cmd = Command::new(&self.program);
        cmd.arg("x").arg(archive).arg(output_flag);
        cmd.stdin(Stdio::null()); // disconnect from self
        cmd
    }
}

impl Extract for SevenZip {
    #[instrument(err, level = "trace", skip(self))]
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), ExtractError> {
        let output = self.command(archive, dest).output().map_err(|source| ExtractError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        trace!(stdout = %String::from_utf8_lossy(&output.stdout));

        if !output.status.success() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr));
            return Err(ExtractError::Failed { status: output.status });
        }

        Ok(())
    }
}
