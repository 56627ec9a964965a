//! Terminal rendition of engine progress

use super::theme::{Palette, Theme};
use synctropy_engine::{Reporter, Tone};

/// Spaces per nesting level
pub const INDENT: &str = "    ";

/// Fallback width when stdout is not a terminal
const DEFAULT_WIDTH: usize = 80;

/// Prefix `text` with `depth` indentation levels
pub fn indented(text: &str, depth: usize) -> String {
    format!("{}{text}", INDENT.repeat(depth))
}

/// Current terminal width in columns
pub fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(DEFAULT_WIDTH, |(terminal_size::Width(w), _)| {
        usize::from(w)
    })
}

/// Horizontal rule of `ch` spanning `factor` of the terminal width
pub fn rule(ch: char, factor: f64, width: usize) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let count = (width as f64 * factor.max(0.0)) as usize;
    ch.to_string().repeat(count)
}

/// Prints engine progress to stdout
#[derive(Debug, Clone, Copy)]
pub struct TerminalReporter {
    theme: Theme,
}

impl TerminalReporter {
    /// Reporter painting with `theme`
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Theme in use
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Render one line without printing it
    pub fn render(&self, tone: Tone, text: &str, depth: usize) -> String {
        let color = match tone {
            Tone::Section => Palette::LIGHT_GRAY,
            Tone::Note => Palette::GRAY,
            Tone::Attention => Palette::ORANGE,
            Tone::Success => Palette::BLUE,
            Tone::Error => Palette::RED,
        };
        self.theme.paint(color, &indented(text, depth))
    }
}

impl Reporter for TerminalReporter {
    fn message(&self, tone: Tone, text: &str, depth: usize) {
        println!("{}", self.render(tone, text, depth));
    }

    fn counter(&self, index: usize, total: usize) {
        println!("{}", self.theme.paint(Palette::ORANGE, &format!("({index}/{total})")));
    }

    fn ruler(&self, depth: usize) {
        println!("{}", indented(&rule('-', 0.5, terminal_width()), depth));
    }

    fn blank(&self) {
        println!();
    }
}
