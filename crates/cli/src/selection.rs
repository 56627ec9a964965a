//! Crate and target selection flags
//!
//! Commands pick their entities either by name, with `--all`, or through an
//! interactive menu. Exactly one of those modes must be given; clap enforces
//! that before a command runs.

use crate::error::{CommandError, Result};
use crate::ui::prompt;
use clap::Args;
use synctropy_engine::{Catalog, Crate, Target};

/// `-c NAME... | -a | -i`
#[derive(Debug, Clone, Default, Args)]
#[group(required = true, multiple = false)]
pub struct CrateSelection {
    /// Crate name(s)
    #[arg(short = 'c', long = "crate", value_name = "NAME", value_delimiter = ',')]
    pub crates: Vec<String>,

    /// Include all crates
    #[arg(short, long)]
    pub all: bool,

    /// Interactive selection
    #[arg(short, long)]
    pub interactive: bool,
}

impl CrateSelection {
    /// Crates picked by the flags, in the order given or listed
    pub fn resolve(&self, catalog: &Catalog<'_>) -> Result<Vec<Crate>> {
        if self.interactive {
            let available = catalog.crates()?;
            let names: Vec<String> = available.iter().map(|k| k.name.clone()).collect();
            let picked = prompt::select_many("Select the crate(s)", &names)?;
            if picked.is_empty() {
                return Err(CommandError::NothingSelected("crates"));
            }
            return Ok(picked.into_iter().map(|i| available[i].clone()).collect());
        }
        if self.all {
            return Ok(catalog.crates()?);
        }
        Ok(catalog.crates_named(&self.crates)?)
    }
}

/// `-c CRATE (-t NAME... | -a) | -i`
#[derive(Debug, Clone, Default, Args)]
pub struct TargetSelection {
    /// Crate name
    #[arg(
        short = 'c',
        long = "crate",
        value_name = "NAME",
        required_unless_present = "interactive",
        conflicts_with = "interactive"
    )]
    pub krate: Option<String>,

    /// Target name(s)
    #[arg(
        short = 't',
        long = "target",
        value_name = "NAME",
        value_delimiter = ',',
        required_unless_present_any = ["all", "interactive"],
        conflicts_with_all = ["all", "interactive"]
    )]
    pub targets: Vec<String>,

    /// Include all targets of the crate
    #[arg(short, long, conflicts_with = "interactive")]
    pub all: bool,

    /// Interactive selection (crate first, then targets)
    #[arg(short, long)]
    pub interactive: bool,
}

impl TargetSelection {
    /// The crate and its targets picked by the flags
    pub fn resolve(&self, catalog: &Catalog<'_>) -> Result<(Crate, Vec<Target>)> {
        if self.interactive {
            let crates = catalog.crates()?;
            let names: Vec<String> = crates.iter().map(|k| k.name.clone()).collect();
            let krate = crates[prompt::select_one("Select the crate", &names)?].clone();

            let available = catalog.targets(&krate)?;
            let names: Vec<String> = available.iter().map(|t| t.name.clone()).collect();
            let picked = prompt::select_many("Select the target(s)", &names)?;
            if picked.is_empty() {
                return Err(CommandError::NothingSelected("targets"));
            }
            let targets = picked.into_iter().map(|i| available[i].clone()).collect();
            return Ok((krate, targets));
        }

        let name = self
            .krate
            .as_deref()
            .ok_or_else(|| CommandError::Usage("Missing required flag '--crate/-c'".to_string()))?;
        let krate = catalog.crate_named(name)?;
        let targets = if self.all {
            catalog.targets(&krate)?
        } else {
            catalog.targets_named(&krate, &self.targets)?
        };
        Ok((krate, targets))
    }
}
