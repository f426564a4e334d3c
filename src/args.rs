//! Arguments.
//!
//! This module contains the definition for the available command-line parameter.

use crate::extract::DEFAULT_SEVEN_ZIP;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(author, about)]
pub(crate) struct Args {
    /// The command (setup, xampp, phps, info, list, load, download, help)
    pub(crate) command: Option<String>,
    /// The argument of the command
    #[clap(allow_hyphen_values = true)]
    pub(crate) arguments: Vec<String>,
    /// Sets the directory holding config.json, php_versions and temps [default: directory of the executable]
    #[clap(long, value_name = "dir", env = "PEACH_HOME")]
    pub(crate) home: Option<PathBuf>,
    /// Sets the archive tool used to extract downloaded versions
    #[clap(long, value_name = "program", env = "PEACH_SEVEN_ZIP", default_value = DEFAULT_SEVEN_ZIP)]
    pub(crate) seven_zip: String,
    /// Suppress unnecessary information
    #[clap(short = 'q', long, action)]
    pub(crate) quiet: bool,
    /// Change level of verbosity (apply multiple times to increase level)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
    /// Print version information
    #[clap(short = 'V', long, action)]
    pub(crate) version: bool,
}

impl Args {
    /// Returns the command followed by its arguments.
    pub(crate) fn words(&self) -> Vec<String> {
        self.command.iter().chain(&self.arguments).cloned().collect()
    }
}
