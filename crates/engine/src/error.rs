//! Run-terminating failures
//!
//! The orchestrator returns an [`Abort`] when a phase outcome ends the whole
//! run. The binary turns it into the process exit code exactly once.

use synctropy_core::{Error, exit_code};
use thiserror::Error;

/// Reason a run stopped early
#[derive(Error, Debug)]
pub enum Abort {
    /// A hook ran and exited non-zero
    #[error("Hook '{hook}' of {entity} failed with exit code {exit_code}")]
    HookFailed {
        /// Label of the entity the hook belongs to
        entity: String,
        /// Hook name
        hook: String,
        /// Exit code the hook returned
        exit_code: i32,
    },

    /// A mandatory hook does not exist
    #[error("No '{hook}' hook found for {entity}")]
    HookMissing {
        /// Label of the entity the hook belongs to
        entity: String,
        /// Hook name
        hook: String,
    },

    /// A hook could not be run at all
    #[error("Hook '{hook}' of {entity} could not run: {source}")]
    Execution {
        /// Label of the entity the hook belongs to
        entity: String,
        /// Hook name
        hook: String,
        /// Resolution, spawn or PTY failure
        #[source]
        source: Error,
    },

    /// Directory, marker or lookup failure outside any hook
    #[error(transparent)]
    Engine(#[from] Error),
}

impl Abort {
    /// Exit code the process terminates with
    ///
    /// Hook exit codes propagate verbatim; everything else maps to the fixed
    /// codes in [`synctropy_core::exit_code`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HookFailed { exit_code, .. } => *exit_code,
            Self::HookMissing { .. } => exit_code::HOOK_NOT_FOUND,
            Self::Execution { source, .. } | Self::Engine(source) => source.exit_code(),
        }
    }

    /// Entity and hook the failure belongs to, if any
    pub fn hook(&self) -> Option<(&str, &str)> {
        match self {
            Self::HookFailed { entity, hook, .. }
            | Self::HookMissing { entity, hook }
            | Self::Execution { entity, hook, .. } => Some((entity, hook)),
            Self::Engine(_) => None,
        }
    }
}
