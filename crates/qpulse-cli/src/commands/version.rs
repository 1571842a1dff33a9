//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - pulse sequence compiler and randomized benchmarking",
        style("qpulse").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qpulse-pulse     Pulse envelopes and transmon model");
    println!("  qpulse-ir        Gates, sequences and generators");
    println!("  qpulse-compile   Scheduling and waveform rendering");
    println!("  qpulse-clifford  Clifford algebra and recovery tables");
    println!("  qpulse-cli       Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
