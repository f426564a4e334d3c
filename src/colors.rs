//! Global colors.

use nu_ansi_term::Color;

/// The attention color (fatal errors).
pub(crate) const ATTENTION_COLOR: Color = Color::Red;

/// The information color.
pub(crate) const INFO_COLOR: Color = Color::Cyan;

/// The color used for tolerated problems.
pub(crate) const WARN_COLOR: Color = Color::Yellow;

/// The color used to colorise the path.
pub(crate) const PATH_COLOR: Color = Color::LightBlue;

/// The color used to colorise a PHP version.
pub(crate) const VERSION_COLOR: Color = Color::Green;
