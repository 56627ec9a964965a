//! Entry command resolution
//!
//! A hook runs through the interpreter named in its `<hook>.entry` sidecar,
//! or through the default shell when there is no sidecar.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use synctropy_core::{Error, Result};

/// Suffix of the sidecar file naming a hook's interpreter
pub const ENTRY_SUFFIX: &str = ".entry";

/// Interpreter and arguments used to run a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCommand {
    /// Program to execute
    pub program: OsString,
    /// Arguments, hook path last
    pub args: Vec<OsString>,
}

impl EntryCommand {
    /// Program name for display
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl fmt::Display for EntryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Path of the sidecar belonging to `hook_path`
pub fn sidecar_path(hook_path: &Path) -> PathBuf {
    let mut path = hook_path.as_os_str().to_owned();
    path.push(ENTRY_SUFFIX);
    PathBuf::from(path)
}

/// Whether a file name is an entry sidecar rather than a hook
pub fn is_sidecar(file_name: &OsStr) -> bool {
    file_name
        .to_str()
        .is_some_and(|name| name.ends_with(ENTRY_SUFFIX))
}

/// Read the sidecar tokens, `None` when there is no sidecar
fn read_sidecar(hook_path: &Path) -> Result<Option<Vec<String>>> {
    let path = sidecar_path(hook_path);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(
            contents.split_whitespace().map(str::to_string).collect(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::EntryRead { path, source }),
    }
}

/// Resolve the command that runs `hook_path`
///
/// Sidecar contents are split on runs of whitespace. The first token is the
/// program, the rest become leading arguments, and the hook path is always
/// appended last. An absent or blank sidecar falls back to `default_shell`
/// with the hook path as the only argument.
///
/// # Examples
///
/// ```ignore
/// // hooks/sync.entry contains "python3 -u"
/// let cmd = resolve(Path::new("/c/hooks/sync"), Path::new("/bin/sh"))?;
/// assert_eq!(cmd.to_string(), "python3 -u /c/hooks/sync");
/// ```
pub fn resolve(hook_path: &Path, default_shell: &Path) -> Result<EntryCommand> {
    let hook_arg = hook_path.as_os_str().to_owned();

    let tokens = read_sidecar(hook_path)?.unwrap_or_default();
    let mut tokens = tokens.into_iter();

    let command = match tokens.next() {
        Some(program) => {
            let mut args: Vec<OsString> = tokens.map(OsString::from).collect();
            args.push(hook_arg);
            EntryCommand {
                program: program.into(),
                args,
            }
        }
        None => EntryCommand {
            program: default_shell.as_os_str().to_owned(),
            args: vec![hook_arg],
        },
    };

    tracing::debug!(hook = %hook_path.display(), command = %command, "Resolved entry command");
    Ok(command)
}

/// Text shown by `hooks ls`: the sidecar line, or the default shell
pub fn describe(hook_path: &Path, default_shell: &Path) -> Result<String> {
    Ok(match read_sidecar(hook_path)? {
        Some(tokens) if !tokens.is_empty() => tokens.join(" "),
        _ => default_shell.to_string_lossy().into_owned(),
    })
}
