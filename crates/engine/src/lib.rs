//! # Synctropy Engine
//!
//! Hook orchestration for the synctropy sync manager.
//!
//! A user's data directory holds *crates*, each holding *targets*; both carry
//! a `hooks/` directory of user-supplied executables. This crate turns those
//! hooks into transactions:
//!
//! - **Entities**: crates and targets materialized from directory names
//! - **Catalog**: listing and name lookup over the crates root
//! - **Hooks**: entry command resolution and PTY-backed execution
//! - **Scratch**: the per-entity `.tmp` directory bracketing active phases
//! - **Orchestration**: hook batches and the sync transaction, with failure policy
//! - **Lifecycle**: create/remove with `post_create`/`pre_rm` hooks, `ls` descriptions

pub mod catalog;
pub mod entity;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod orchestrator;
pub mod report;
pub mod scratch;
pub mod template;

#[cfg(test)]
mod testing;

// Re-export error types from core
pub use synctropy_core::{Error, Result};

// Re-export commonly used types
pub use catalog::Catalog;
pub use entity::{Crate, Entity, Environment, MarkerChange, Target};
pub use error::Abort;
pub use orchestrator::{Orchestrator, SyncReport, TargetBatch};
pub use report::{Reporter, SilentReporter, Tone};
pub use scratch::Scratch;
pub use template::Template;
