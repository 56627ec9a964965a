//! Command trait for synctropy CLI
//!
//! Every subcommand that works on the user data directory implements
//! [`Command`], receiving a [`RuntimeContext`] with the resolved program,
//! configuration and terminal reporter.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all synctropy commands
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
/// use clap::Args;
///
/// #[derive(Debug, Args)]
/// pub struct ViewCommand {
///     #[command(flatten)]
///     pub selection: CrateSelection,
/// }
///
/// impl Command for ViewCommand {
///     type Output = ();
///
///     fn execute(&self, context: &RuntimeContext) -> Result<()> {
///         let crates = self.selection.resolve(&context.catalog(), true)?;
///         // ...
///         Ok(())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` whose exit code becomes the process exit code.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
