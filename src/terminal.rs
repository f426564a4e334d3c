//! Terminal.
//!
//! This module contains terminal related things: the `[info]`/`[warn]`/`[error]` console lines and the window title.

use crate::colors::*;
use std::fmt::Display;

/// Prints an informational line to stdout.
pub(crate) fn info(message: impl Display) {
    println!("{} {message}", INFO_COLOR.paint("[info]"));
}

/// Prints a line about a tolerated problem to stdout.
pub(crate) fn warn(message: impl Display) {
    println!("{} {message}", WARN_COLOR.paint("[warn]"));
}

/// Prints a fatal error line to stderr.
pub(crate) fn error(message: impl Display) {
    eprintln!("{} {message}", ATTENTION_COLOR.paint("[error]"));
}

// https://learn.microsoft.com/en-us/windows/console/console-virtual-terminal-sequences
#[doc(hidden)]
pub(crate) fn set_window_title(title: &str) {
    print!("\x1b]0;{title}\x1b\\");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}
