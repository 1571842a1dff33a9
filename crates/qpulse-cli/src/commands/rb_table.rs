//! Recovery table command implementation.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qpulse_clifford::{Generator, RecoveryTable};

/// Execute the rb-table command.
pub fn execute(generator: &str, output: &str) -> Result<()> {
    let generator: Generator = generator.parse()?;
    println!(
        "{} Building {} recovery table",
        style("→").cyan().bold(),
        style(generator).yellow()
    );

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} stabilizer states")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let table = RecoveryTable::build(generator, None, |done, total| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    })?;
    bar.finish_and_clear();

    table
        .save(output)
        .with_context(|| format!("Failed to write {output}"))?;

    println!("{} Table complete", style("✓").green().bold());
    println!("  Entries: {}", table.len());
    println!("  Output:  {}", style(output).green());
    Ok(())
}
