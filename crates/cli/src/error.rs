//! Error types for CLI commands
//!
//! Every failure that reaches `main` is a [`CommandError`], which knows the
//! process exit code it maps to and whether it still needs printing.

use synctropy_core::exit_code;
use synctropy_engine::Abort;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// A transaction or hook batch stopped early
    #[error(transparent)]
    Abort(#[from] Abort),

    /// Engine, configuration or filesystem error
    #[error(transparent)]
    Core(#[from] synctropy_core::Error),

    /// Interactive prompt failed (no terminal, I/O error)
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The user backed out of a prompt or confirmation
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Interactive selection ended up empty
    #[error("No {0} were selected")]
    NothingSelected(&'static str),

    /// Invalid command-line input not caught by clap
    #[error("{0}")]
    Usage(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminate with a specific exit code and no message
    #[error("exit code {0}")]
    Exit(i32),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Exit code the process terminates with
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Abort(abort) => abort.exit_code(),
            Self::Core(err) => err.exit_code(),
            Self::Prompt(_) => exit_code::IO_ERROR,
            Self::Exit(code) => *code,
            Self::Cancelled
            | Self::NothingSelected(_)
            | Self::Usage(_)
            | Self::Json(_)
            | Self::Other(_) => exit_code::FAILURE,
        }
    }

    /// Whether the failure was already shown to the user while it happened
    ///
    /// Hook failures are reported in place by the terminal reporter, so
    /// `main` only has to exit with the right code.
    pub fn already_reported(&self) -> bool {
        matches!(
            self,
            Self::Abort(Abort::HookFailed { .. } | Abort::HookMissing { .. }) | Self::Exit(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_exit_code_reaches_process() {
        let err: CommandError = Abort::HookFailed {
            entity: "alpha/t2".to_string(),
            hook: "sync".to_string(),
            exit_code: 3,
        }
        .into();

        assert_eq!(err.exit_code(), 3);
        assert!(err.already_reported());
    }

    #[test]
    fn test_core_errors_keep_their_codes() {
        let err: CommandError =
            synctropy_core::Error::CrateNotFound(vec!["ghost".to_string()]).into();
        assert_eq!(err.exit_code(), exit_code::FAILURE);
        assert!(!err.already_reported());

        let err: CommandError = synctropy_core::Error::Config("bad".to_string()).into();
        assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);
    }

    #[test]
    fn test_silent_exit() {
        let err = CommandError::Exit(1);
        assert_eq!(err.exit_code(), 1);
        assert!(err.already_reported());
    }

    #[test]
    fn test_cancelled_message() {
        assert_eq!(
            CommandError::Cancelled.to_string(),
            "Operation cancelled by user"
        );
        assert_eq!(
            CommandError::NothingSelected("crates").to_string(),
            "No crates were selected"
        );
    }
}
