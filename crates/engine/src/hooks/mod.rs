//! Hook resolution and execution
//!
//! ## Module Organization
//!
//! - `entry`: picks the interpreter for a hook (`<hook>.entry` sidecar or default shell)
//! - `runner`: runs a resolved command inside a pseudo-terminal
//! - `executor`: runs one named hook against one entity and classifies the outcome
//! - `listing`: hook discovery for `hooks ls`

pub mod entry;
pub mod executor;
pub mod listing;
pub mod runner;

// Re-export main types for convenience
pub use entry::EntryCommand;
pub use executor::{HookExecutor, HookExecutorBuilder, HookOptions, HookOutcome};
pub use listing::{HookEntry, list_hooks};
pub use runner::{CommandRunner, CompletedCommand, OutputMode, PtyRunner};
