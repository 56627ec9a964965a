//! Terminal UI components for synctropy
//!
//! - `theme`: palette and color switching
//! - `reporter`: engine progress rendered as indented, colored lines
//! - `prompt`: confirmations and interactive selection

pub mod prompt;
pub mod reporter;
pub mod theme;

pub use reporter::{INDENT, TerminalReporter, indented, rule, terminal_width};
pub use theme::{Palette, Theme, parse_hex};
