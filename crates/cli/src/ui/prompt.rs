//! Interactive prompts

use super::reporter::indented;
use crate::error::{CommandError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};

const PAGE_SIZE: usize = 10;

/// Ask a yes/no question; backing out counts as "no"
pub fn confirm(message: &str, depth: usize) -> Result<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(indented(message, depth))
        .default(false)
        .interact_opt()?;
    Ok(answer.unwrap_or(false))
}

/// Pick exactly one of `items`
pub fn select_one(prompt: &str, items: &[String]) -> Result<usize> {
    if items.is_empty() {
        return Err(CommandError::Usage(format!("{prompt}: nothing to choose from")));
    }
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .max_length(PAGE_SIZE)
        .interact_opt()?
        .ok_or(CommandError::Cancelled)
}

/// Pick any number of `items`, in listing order
pub fn select_many(prompt: &str, items: &[String]) -> Result<Vec<usize>> {
    if items.is_empty() {
        return Err(CommandError::Usage(format!("{prompt}: nothing to choose from")));
    }
    MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .max_length(PAGE_SIZE)
        .interact_opt()?
        .ok_or(CommandError::Cancelled)
}
