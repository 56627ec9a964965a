//! Info command implementation
//!
//! Display program, configuration, build and platform information.

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use synctropy_config::config_file;
use synctropy_core::platform::CURRENT_PLATFORM;
use tracing::debug;

const NOT_FOUND: &str = "not found";

#[derive(Debug, Serialize)]
struct InfoData {
    program: ProgramInfo,
    build: BuildInfo,
    system: SystemInfo,
    data: DataInfo,
}

#[derive(Debug, Serialize)]
struct ProgramInfo {
    name: String,
    version: String,
    executable: String,
    default_shell: String,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    rustc: Option<&'static str>,
    timestamp: Option<&'static str>,
    target: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SystemInfo {
    platform: String,
}

#[derive(Debug, Serialize)]
struct DataInfo {
    directory: String,
    initialized: bool,
    config: String,
    config_exists: bool,
    crates: Option<usize>,
    targets: Option<usize>,
}

/// Info command
#[derive(Debug, Args)]
pub struct InfoCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Command for InfoCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let info = gather_info(context);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            display_table(&info, context.reporter().theme().enabled());
        }
        Ok(())
    }
}

fn gather_info(context: &RuntimeContext) -> InfoData {
    debug!("Gathering program information");
    let program = &context.program;
    let config_path = config_file(&program.data_dir);
    let initialized = program.is_initialized();

    // Counting is best effort; a broken crate must not hide the rest
    let (crates, targets) = if initialized {
        let catalog = context.catalog();
        match catalog.crates() {
            Ok(crates) => {
                let targets = crates
                    .iter()
                    .filter_map(|krate| catalog.target_names(krate).ok())
                    .map(|names| names.len())
                    .sum();
                (Some(crates.len()), Some(targets))
            }
            Err(_) => (None, None),
        }
    } else {
        (None, None)
    };

    InfoData {
        program: ProgramInfo {
            name: program.name.clone(),
            version: program.version.clone(),
            executable: program.exec.display().to_string(),
            default_shell: program.default_shell.display().to_string(),
        },
        build: BuildInfo {
            rustc: option_env!("VERGEN_RUSTC_SEMVER"),
            timestamp: option_env!("VERGEN_BUILD_TIMESTAMP"),
            target: option_env!("VERGEN_RUSTC_HOST_TRIPLE"),
        },
        system: SystemInfo {
            platform: CURRENT_PLATFORM.label(),
        },
        data: DataInfo {
            directory: program.data_dir.display().to_string(),
            initialized,
            config_exists: config_path.is_file(),
            config: config_path.display().to_string(),
            crates,
            targets,
        },
    }
}

fn display_table(info: &InfoData, color: bool) {
    print_section_header("Program", color);
    print_row("Name", &info.program.name, true, None, color);
    print_row("Version", &info.program.version, true, None, color);
    print_row("Executable", &info.program.executable, true, None, color);
    print_row("Default shell", &info.program.default_shell, true, None, color);
    println!();

    print_section_header("Build", color);
    print_row("Rustc", info.build.rustc.unwrap_or(NOT_FOUND), info.build.rustc.is_some(), None, color);
    if let Some(timestamp) = info.build.timestamp {
        print_row("Timestamp", timestamp, true, None, color);
    }
    if let Some(target) = info.build.target {
        print_row("Target", target, true, None, color);
    }
    println!();

    print_section_header("System", color);
    print_row("Platform", &info.system.platform, true, None, color);
    println!();

    print_section_header("Data", color);
    print_row(
        "Directory",
        &info.data.directory,
        info.data.initialized,
        (!info.data.initialized).then_some("run `synctropy init`"),
        color,
    );
    print_row(
        "Config",
        &info.data.config,
        info.data.config_exists,
        (!info.data.config_exists).then_some("defaults"),
        color,
    );
    if let (Some(crates), Some(targets)) = (info.data.crates, info.data.targets) {
        print_row("Crates", &crates.to_string(), true, None, color);
        print_row("Targets", &targets.to_string(), true, None, color);
    }
}

fn print_section_header(name: &str, color: bool) {
    if color {
        println!("{}", name.bright_white().bold());
    } else {
        println!("{name}");
    }
}

fn print_row(label: &str, value: &str, ok: bool, note: Option<&str>, color: bool) {
    let symbol = match (ok, color) {
        (true, true) => "✓".bright_green().to_string(),
        (false, true) => "⚠".yellow().to_string(),
        (true, false) => "✓".to_string(),
        (false, false) => "⚠".to_string(),
    };
    let value = if color && !ok {
        value.dimmed().to_string()
    } else {
        value.to_string()
    };

    match note {
        Some(note) if color => println!("  {symbol} {label:14} {value} {}", format!("({note})").dimmed()),
        Some(note) => println!("  {symbol} {label:14} {value} ({note})"),
        None => println!("  {symbol} {label:14} {value}"),
    }
}
