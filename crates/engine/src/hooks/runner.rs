//! Subprocess execution inside a pseudo-terminal
//!
//! Hooks run attached to a fresh PTY so interactive and TTY-sensitive
//! scripts behave as if started from the operator's shell. Output is
//! echoed live unless discarded and is always collected for the caller.

use super::entry::EntryCommand;
use crate::entity::Environment;
use crossterm::terminal;
use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use std::io::{self, IsTerminal, Read, Write};
use std::sync::{Mutex, Once, PoisonError};
use std::thread;
use synctropy_core::{Error, Result};

/// What to do with a hook's terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Echo output to the invoking terminal as it arrives
    Stream,
    /// Collect output without displaying it
    Discard,
}

/// A process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCommand {
    /// Combined output as the terminal presented it, `\r\n` folded to `\n`
    pub output: String,
    /// Process exit code
    pub exit_code: i32,
}

impl CompletedCommand {
    /// Whether the process exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes resolved entry commands
///
/// A non-zero exit is a normal result. Errors are reserved for processes
/// that could not be started at all.
pub trait CommandRunner {
    /// Run `command` with exactly `env` as its environment
    fn run(&self, command: &EntryCommand, env: &Environment, mode: OutputMode)
    -> Result<CompletedCommand>;
}

/// [`CommandRunner`] backed by a native pseudo-terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct PtyRunner;

impl CommandRunner for PtyRunner {
    #[tracing::instrument(skip(self, command, env), fields(command = %command))]
    fn run(
        &self,
        command: &EntryCommand,
        env: &Environment,
        mode: OutputMode,
    ) -> Result<CompletedCommand> {
        let pair = native_pty_system()
            .openpty(current_pty_size())
            .map_err(|e| Error::PtyAllocation(e.into()))?;

        let mut builder = CommandBuilder::new(&command.program);
        builder.args(&command.args);
        builder.env_clear();
        for (key, value) in env {
            builder.env(key, value);
        }
        // Without an explicit cwd the child would start in $HOME
        builder.cwd(std::env::current_dir()?);

        let mut child = pair
            .slave
            .spawn_command(builder)
            .map_err(|e| Error::Spawn {
                program: command.program_name(),
                source: e.into(),
            })?;
        // Only the child may hold the slave side, or reads never see EOF
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| Error::PtyAllocation(e.into()))?;
        let echo = mode == OutputMode::Stream;
        let pump = thread::spawn(move || pump_output(reader, echo));

        let interactive = echo && io::stdin().is_terminal();
        let _raw_mode = if interactive {
            let writer = pair
                .master
                .take_writer()
                .map_err(|e| Error::PtyAllocation(e.into()))?;
            attach_stdin(writer);
            RawModeGuard::enable()
        } else {
            None
        };

        let status = child.wait();
        if interactive {
            detach_stdin();
        }
        let status = status?;

        let output = pump
            .join()
            .map_err(|_| Error::Message("PTY output reader panicked".to_string()))?;

        let exit_code = i32::try_from(status.exit_code()).unwrap_or(i32::MAX);
        tracing::debug!(exit_code, "Process finished");

        Ok(CompletedCommand {
            output: String::from_utf8_lossy(&output).replace("\r\n", "\n"),
            exit_code,
        })
    }
}

/// PTY size matching the invoking terminal, 80x24 when unknown
fn current_pty_size() -> PtySize {
    let (cols, rows) = terminal_size::terminal_size()
        .map_or((80, 24), |(terminal_size::Width(w), terminal_size::Height(h))| {
            (w, h)
        });
    PtySize {
        rows,
        cols,
        pixel_width: 0,
        pixel_height: 0,
    }
}

/// Read the PTY until the child side closes
///
/// Linux reports the closed slave as `EIO` rather than EOF, so any read
/// error ends the stream.
fn pump_output(mut reader: Box<dyn Read + Send>, echo: bool) -> Vec<u8> {
    let mut collected = Vec::new();
    let mut buf = [0u8; 4096];
    let mut stdout = io::stdout();
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if echo {
                    let _ = stdout.write_all(&buf[..n]);
                    let _ = stdout.flush();
                }
                collected.extend_from_slice(&buf[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
    collected
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Option<Self> {
        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self),
            Err(e) => {
                tracing::debug!("Could not enable raw mode: {e}");
                None
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// PTY currently receiving the operator's keystrokes
static STDIN_SINK: Mutex<Option<Box<dyn Write + Send>>> = Mutex::new(None);
static STDIN_FORWARDER: Once = Once::new();

/// Route stdin to `writer` until [`detach_stdin`]
///
/// A single forwarding thread lives for the whole process so that a
/// blocked stdin read never steals keystrokes from the next hook.
fn attach_stdin(writer: Box<dyn Write + Send>) {
    *STDIN_SINK.lock().unwrap_or_else(PoisonError::into_inner) = Some(writer);
    STDIN_FORWARDER.call_once(|| {
        thread::spawn(forward_stdin);
    });
}

fn detach_stdin() {
    *STDIN_SINK.lock().unwrap_or_else(PoisonError::into_inner) = None;
}

fn forward_stdin() {
    let mut stdin = io::stdin();
    let mut buf = [0u8; 1024];
    loop {
        match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let mut sink = STDIN_SINK.lock().unwrap_or_else(PoisonError::into_inner);
                if let Some(writer) = sink.as_mut() {
                    let _ = writer.write_all(&buf[..n]);
                    let _ = writer.flush();
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => break,
        }
    }
}
