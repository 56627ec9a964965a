//! `utils` subcommands
//!
//! Small output and prompt helpers for hook scripts, reached through the
//! `SYNCTROPY_UTILS` variable. They print in the same style as the engine's
//! own progress lines.

use crate::error::{CommandError, Result};
use crate::ui::{TerminalReporter, Theme, parse_hex, prompt, rule, terminal_width};
use clap::Subcommand;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use synctropy_core::exit_code;
use synctropy_engine::{Reporter, Tone};

/// Cached regex for backslash escapes in `utils msg`
static ESCAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\\([nrt\\"])"#).expect("ESCAPE_REGEX compilation should never fail")
});

/// Helpers for hook scripts
#[derive(Debug, Subcommand)]
pub enum UtilsCommands {
    /// Print a message in a custom color
    Msg {
        /// Color as `#rrggbb`
        hex: String,
        /// Message; `\n` and `\t` escapes are rendered
        message: String,
    },

    /// Print an attention message
    Attention {
        /// Message
        message: String,
    },

    /// Print an error message
    Error {
        /// Message
        message: String,
    },

    /// Print a success message
    Success {
        /// Message
        message: String,
    },

    /// Print a section title
    Section {
        /// Message
        message: String,
    },

    /// Print a horizontal rule
    Hr {
        /// Character to repeat
        ch: char,
        /// Fraction of the terminal width
        factor: f64,
    },

    /// Ask for confirmation; exits 0 on yes and 1 on no
    Confirm {
        /// Question to ask
        message: String,
    },
}

/// Render `\n`, `\r`, `\t`, `\\` and `\"` escapes
pub fn unescape(text: &str) -> String {
    ESCAPE_REGEX
        .replace_all(text, |caps: &Captures<'_>| match &caps[1] {
            "n" => "\n".to_string(),
            "r" => "\r".to_string(),
            "t" => "\t".to_string(),
            other => other.to_string(),
        })
        .into_owned()
}

/// Run a utils subcommand
pub fn run(command: &UtilsCommands) -> Result<()> {
    let reporter = TerminalReporter::new(Theme::detect(true));
    match command {
        UtilsCommands::Msg { hex, message } => {
            let color = parse_hex(hex)
                .ok_or_else(|| CommandError::Usage(format!("Invalid color '{hex}', expected #rrggbb")))?;
            println!("{}", reporter.theme().paint(color, &unescape(message)));
        }
        UtilsCommands::Attention { message } => reporter.message(Tone::Attention, message, 0),
        UtilsCommands::Error { message } => reporter.message(Tone::Error, message, 0),
        UtilsCommands::Success { message } => reporter.message(Tone::Success, message, 0),
        UtilsCommands::Section { message } => reporter.message(Tone::Section, message, 0),
        UtilsCommands::Hr { ch, factor } => println!("{}", rule(*ch, *factor, terminal_width())),
        UtilsCommands::Confirm { message } => {
            if !prompt::confirm(message, 0)? {
                return Err(CommandError::Exit(exit_code::FAILURE));
            }
        }
    }
    Ok(())
}
