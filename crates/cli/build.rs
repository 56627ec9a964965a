//! Build script for synctropy-cli.
//!
//! Generates build-time metadata using vergen:
//! - Build information (timestamp, target)
//! - Rustc version information

fn main() -> anyhow::Result<()> {
    let build = vergen::BuildBuilder::all_build()?;
    let rustc = vergen::RustcBuilder::all_rustc()?;

    vergen::Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&rustc)?
        .emit()?;

    Ok(())
}
