//! Command.
//!
//! This module turns the positional command-line words into a [`Command`].

use std::fmt;

/// The error type for parsing a command.
#[cfg_attr(test, derive(PartialEq))]
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    /// The command needs exactly one argument.
    #[error("there must be one argument: {0} <argument>")]
    ArgumentCount(String),
    /// The argument is not a valid version.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

/// The commands understood by peach.
#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    /// Print usage.
    Help,
    /// Report the setup state and the configured paths.
    Info,
    /// List the stored versions, the active version and suggested downloads.
    List,
    /// Create the workspace and the default configuration.
    Setup,
    /// Download a version into the versions folder.
    Download(String),
    /// Make a stored version the active one.
    Load(String),
    /// Set the path of the active installation.
    Xampp(String),
    /// Set the path of the versions folder.
    Phps(String),
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parses the positional words (without the program name).
    pub(crate) fn parse<S: AsRef<str>>(words: &[S]) -> Result<Self, CommandError> {
        let Some((name, rest)) = words.split_first() else {
            return Ok(Self::Help);
        };
        let name = name.as_ref();

        let command = match name {
            "help" => Self::Help,
            "info" => Self::Info,
            "list" => Self::List,
            "setup" => Self::Setup,
            "download" => Self::Download(version_argument(name, rest)?),
            "load" => Self::Load(version_argument(name, rest)?),
            "xampp" => Self::Xampp(single_argument(name, rest)?),
            "phps" => Self::Phps(single_argument(name, rest)?),
            _ => Self::Unknown(name.to_string()),
        };

        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => write!(f, "help"),
            Self::Info => write!(f, "info"),
            Self::List => write!(f, "list"),
            Self::Setup => write!(f, "setup"),
            Self::Download(version) => write!(f, "download {version}"),
            Self::Load(version) => write!(f, "load {version}"),
            Self::Xampp(path) => write!(f, "xampp {path}"),
            Self::Phps(path) => write!(f, "phps {path}"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

// Returns the only argument of the command.
#[doc(hidden)]
fn single_argument<S: AsRef<str>>(name: &str, rest: &[S]) -> Result<String, CommandError> {
    match rest {
        [argument] => Ok(argument.as_ref().to_string()),
        _ => Err(CommandError::ArgumentCount(name.to_string())),
    }
}

// Returns the only argument of the command, which must be a semantic version.
#[doc(hidden)]
fn version_argument<S: AsRef<str>>(name: &str, rest: &[S]) -> Result<String, CommandError> {
    let version = single_argument(name, rest)?;
    if let Err(err) = semver::Version::parse(&version) {
        return Err(CommandError::InvalidVersion {
            version,
            reason: err.to_string(),
        });
    }

    Ok(version)
}

#[cfg(test)]
mod tests {

    use super::*;
    use test_log::test;

    #[test]
    fn no_words() {
        let words: [&str; 0] = [];
        assert_eq!(Command::Help, Command::parse(&words).unwrap());
    }

    #[test]
    fn commands_without_argument() {
        assert_eq!(Command::Help, Command::parse(&["help"]).unwrap());
        assert_eq!(Command::Info, Command::parse(&["info"]).unwrap());
        assert_eq!(Command::List, Command::parse(&["list"]).unwrap());
        assert_eq!(Command::Setup, Command::parse(&["setup"]).unwrap());
    }

    #[test]
    fn commands_with_argument() {
        assert_eq!(Command::Download("8.1.12".into()), Command::parse(&["download", "8.1.12"]).unwrap());
        assert_eq!(Command::Load("7.4.33".into()), Command::parse(&["load", "7.4.33"]).unwrap());
        assert_eq!(Command::Xampp(r"C:\xampp".into()), Command::parse(&["xampp", r"C:\xampp"]).unwrap());
        assert_eq!(Command::Phps(r"D:\phps".into()), Command::parse(&["phps", r"D:\phps"]).unwrap());
    }

    #[test]
    fn missing_argument() {
        let err = Command::parse(&["xampp"]).unwrap_err();
        assert_eq!(CommandError::ArgumentCount("xampp".into()), err);
        assert_eq!("there must be one argument: xampp <argument>", err.to_string());
    }

    #[test]
    fn too_many_arguments() {
        let err = Command::parse(&["load", "8.1.12", "8.2.0"]).unwrap_err();
        assert_eq!(CommandError::ArgumentCount("load".into()), err);
    }

    #[test]
    fn invalid_version() {
        let err = Command::parse(&["load", ".."]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidVersion { .. }));
        let err = Command::parse(&["download", "8.1"]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidVersion { .. }));
    }

    #[test]
    fn unknown_command() {
        let command = Command::parse(&["frobnicate", "x"]).unwrap();
        assert_eq!(Command::Unknown("frobnicate".into()), command);
        assert_eq!("frobnicate", command.to_string());
    }
}
