//! `avg update` - Refresh virus definitions.

use anyhow::{Context as _, Result};
use colored::Colorize;

use super::Context;

pub async fn execute(ctx: Context) -> Result<()> {
    let scanner = ctx.scanner();

    if ctx.verbose {
        if let Some(previous) = scanner.last_update().await {
            eprintln!("{} {}", "Previous update:".dimmed(), previous);
        }
    }

    let updated = scanner
        .update_definitions()
        .await
        .context("failed to update AVG definitions")?;

    println!("{} {}", "AVG definitions updated:".green().bold(), updated);
    Ok(())
}
