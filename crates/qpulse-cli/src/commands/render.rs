//! Render command implementation.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use console::style;

use qpulse_compile::{Compiler, Waveforms};

use crate::config::RunConfig;

/// Execute the render command.
pub fn execute(config: &str, output: Option<&str>) -> Result<()> {
    println!(
        "{} Rendering {}",
        style("→").cyan().bold(),
        style(config).green()
    );

    let waveforms = render(config)?;
    let points = waveforms.n_points();
    println!(
        "  {} qubit(s), {} points, {:.3} µs",
        waveforms.xy.len(),
        points,
        points as f64 / waveforms.sample_rate * 1e6
    );

    if let Some(path) = output {
        let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
        serde_json::to_writer(BufWriter::new(file), &waveforms)
            .with_context(|| format!("Failed to write {path}"))?;
        println!("  Output: {}", style(path).green());
    }

    println!("{} Render complete", style("✓").green().bold());
    Ok(())
}

/// Load a run file and compile its sequence.
pub fn render(config: &str) -> Result<Waveforms> {
    let run = RunConfig::from_file(config)?;
    let seq = run.build()?;
    let compiler = Compiler::new(run.compiler.clone())?;
    let waveforms = compiler.compile(&seq)?;
    Ok(waveforms)
}
