//! Recover command implementation.

use anyhow::{Context, Result};
use console::style;

use qpulse_clifford::{
    clifford, recover_single, recover_two, Generator, Primitive, RecoveryOptions, RecoveryTable,
    TwoQubitSequence,
};

/// Execute the recover command.
pub fn execute(
    cliffords: &[usize],
    generator: &str,
    table: Option<&str>,
    cheapest: bool,
    single: bool,
) -> Result<()> {
    println!(
        "{} Recovering {} Clifford(s)",
        style("→").cyan().bold(),
        cliffords.len()
    );

    if single {
        let gates = single_qubit_recovery(cliffords, cheapest)?;
        println!("  q0: {}", style(format_gates(&gates)).green());
        return Ok(());
    }

    let generator: Generator = generator.parse()?;
    let table = table
        .map(|path| {
            RecoveryTable::load(path).with_context(|| format!("Failed to load table: {path}"))
        })
        .transpose()?;
    let recovery = two_qubit_recovery(cliffords, generator, table.as_ref(), cheapest)?;
    println!("  q1: {}", style(format_gates(&recovery.q1)).green());
    println!("  q2: {}", style(format_gates(&recovery.q2)).green());
    Ok(())
}

/// Gates undoing the single-qubit Cliffords `cliffords`, applied in order.
pub fn single_qubit_recovery(cliffords: &[usize], cheapest: bool) -> Result<Vec<Primitive>> {
    let mut gates = Vec::new();
    for &index in cliffords {
        gates.extend_from_slice(clifford::single_qubit(index)?);
    }
    let options = RecoveryOptions::default().with_cheapest(cheapest);
    let recovery = recover_single(&clifford::evaluate_single(&gates), &options)?;
    Ok(recovery.sequence)
}

/// Gates undoing the two-qubit Cliffords `cliffords`, applied in order.
///
/// With a table only the final state is restored; without one the search
/// restores the full operator.
pub fn two_qubit_recovery(
    cliffords: &[usize],
    generator: Generator,
    table: Option<&RecoveryTable>,
    cheapest: bool,
) -> Result<TwoQubitSequence> {
    let mut seq = TwoQubitSequence::new();
    for &index in cliffords {
        seq.extend(&clifford::two_qubit(index, generator)?);
    }
    let applied = seq.evaluate();
    let recovery = match table {
        Some(table) => {
            table.check_generator(generator)?;
            table.lookup(&applied)?.clone()
        }
        None => {
            let options = RecoveryOptions::default().with_cheapest(cheapest);
            recover_two(&applied, generator, &options)?.sequence
        }
    };
    Ok(recovery)
}

/// Space-separated gate names.
pub fn format_gates(gates: &[Primitive]) -> String {
    gates
        .iter()
        .map(|g| g.name())
        .collect::<Vec<_>>()
        .join(" ")
}
