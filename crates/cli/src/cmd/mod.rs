//! Subcommand implementations

pub mod crates;
pub mod hooks;
pub mod info;
pub mod init;
pub mod targets;
pub mod utils;

use crate::common::RuntimeContext;
use crate::ui::{Palette, indented};
use clap::Args;
use synctropy_engine::Scratch;

/// Flags shared by every hook batch
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct BatchFlags {
    /// Do not create the temporary directory before running the hook(s)
    #[arg(long = "nocreatetemp")]
    pub no_create_temp: bool,

    /// Do not remove the temporary directory after the hook(s) finished
    #[arg(long = "noremovetemp")]
    pub no_remove_temp: bool,

    /// Do not print hook output (silent)
    #[arg(short, long)]
    pub quiet: bool,
}

impl BatchFlags {
    /// Scratch directory policy requested by the flags
    pub fn scratch(self) -> Scratch {
        Scratch {
            skip_create: self.no_create_temp,
            skip_remove: self.no_remove_temp,
        }
    }
}

/// One `- name (detail)` listing line
pub(crate) fn print_item(context: &RuntimeContext, name: &str, detail: Option<&str>, depth: usize) {
    let theme = context.reporter().theme();
    let line = match detail {
        Some(detail) => format!("- {name} ({})", theme.paint(Palette::BLUE, detail)),
        None => format!("- {name}"),
    };
    println!("{}", indented(&line, depth));
}
