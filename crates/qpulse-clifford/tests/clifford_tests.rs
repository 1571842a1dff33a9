//! Clifford tables, recovery and randomized benchmarking end to end.

use std::sync::OnceLock;

use num_complex::Complex64;
use proptest::prelude::*;
use qpulse_clifford::{
    clifford, recover_single, Generator, Primitive, RecoveryOptions, RecoveryTable,
    SingleQubitRb, TwoQubitRb, TwoQubitSequence, Unitary4x4, N_CLIFFORD_1Q, N_CLIFFORD_2Q,
};
use qpulse_ir::{build_sequence, Gate, GeneratorContext, SequenceOptions};
use qpulse_pulse::Pulse;

fn table(generator: Generator) -> &'static RecoveryTable {
    static CZ: OnceLock<RecoveryTable> = OnceLock::new();
    static ISWAP: OnceLock<RecoveryTable> = OnceLock::new();
    let cell = match generator {
        Generator::Cz => &CZ,
        Generator::Iswap => &ISWAP,
    };
    cell.get_or_init(|| RecoveryTable::build(generator, None, |_, _| {}).unwrap())
}

fn returns_to_ground(m: &Unitary4x4) -> bool {
    (m.data[0].norm() - 1.0).abs() < 1e-6
}

// ---------------------------------------------------------------------------
// Decompositions
// ---------------------------------------------------------------------------

#[test]
fn test_single_qubit_round_trip() {
    for k in 0..N_CLIFFORD_1Q {
        let u = clifford::evaluate_single(clifford::single_qubit(k).unwrap());
        let rec = recover_single(&u, &RecoveryOptions::default()).unwrap();
        assert!((clifford::evaluate_single(&rec.sequence) * u).is_identity(), "index {k}");
    }
}

#[test]
fn test_two_qubit_decompositions_are_unitary() {
    for generator in [Generator::Cz, Generator::Iswap] {
        for k in 0..N_CLIFFORD_2Q {
            let seq = clifford::two_qubit(k, generator).unwrap();
            assert!(seq.evaluate().is_unitary(), "{generator} index {k}");
        }
    }
}

// ---------------------------------------------------------------------------
// Recovery table
// ---------------------------------------------------------------------------

#[test]
fn test_table_has_sixty_stabilizer_states() {
    assert_eq!(table(Generator::Cz).len(), 60);
    assert_eq!(table(Generator::Iswap).len(), 60);
}

#[test]
fn test_table_recovers_every_clifford() {
    for generator in [Generator::Cz, Generator::Iswap] {
        let table = table(generator);
        for k in 0..N_CLIFFORD_2Q {
            let u = clifford::two_qubit(k, generator).unwrap().evaluate();
            let recovery = table.lookup(&u).unwrap();
            assert!(returns_to_ground(&(recovery.evaluate() * u)), "{generator} index {k}");
        }
    }
}

#[test]
fn test_ground_state_entry_is_idle() {
    let recovery = table(Generator::Cz).lookup(&Unitary4x4::identity()).unwrap();
    assert_eq!(recovery.q1, vec![Primitive::I]);
    assert_eq!(recovery.q2, vec![Primitive::I]);
}

#[test]
fn test_table_json_round_trip() {
    let table = table(Generator::Cz);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cz.json");
    table.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"generator\": \"cz\""));
    assert!(text.contains("\"CPh\""));

    let loaded = RecoveryTable::load(&path).unwrap();
    assert_eq!(&loaded, table);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RecoveryTable::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, qpulse_clifford::CliffordError::Io(_)));
}

// ---------------------------------------------------------------------------
// Randomized benchmarking
// ---------------------------------------------------------------------------

#[test]
fn test_empty_two_qubit_rb_recovers_with_identity() {
    let exhaustive = TwoQubitRb {
        cheapest: true,
        ..TwoQubitRb::new(0, 1, Generator::Cz)
    };
    let idle = TwoQubitSequence {
        q1: vec![Primitive::I],
        q2: vec![Primitive::I],
    };
    assert_eq!(exhaustive.sequence().unwrap(), idle);

    let tabled = exhaustive.clone().with_table(table(Generator::Cz).clone());
    assert_eq!(tabled.sequence().unwrap(), idle);

    let ctx = GeneratorContext::new(vec![Pulse::default(); 2]);
    let seq = build_sequence(&tabled, &ctx, &SequenceOptions::default()).unwrap();
    assert_eq!(seq.len(), 2);
    assert!(seq.steps()[0].gates().iter().all(|g| g.as_ref() == Some(&Gate::identity())));
    assert!(seq.steps()[1].has_readout());
}

#[test]
fn test_two_qubit_rb_with_table_returns_to_ground() {
    for seed in 0..5 {
        let rb = TwoQubitRb::new(8, seed, Generator::Cz).with_table(table(Generator::Cz).clone());
        assert!(returns_to_ground(&rb.sequence().unwrap().evaluate()), "seed {seed}");
    }
}

#[test]
fn test_table_generator_must_match() {
    let rb = TwoQubitRb::new(2, 0, Generator::Iswap).with_table(table(Generator::Cz).clone());
    assert!(matches!(
        rb.sequence(),
        Err(qpulse_clifford::CliffordError::GeneratorMismatch { .. })
    ));
}

#[test]
fn test_entanglers_play_on_lower_qubit() {
    let rb = TwoQubitRb {
        qubits: [1, 2],
        interleaved: Some(TwoQubitSequence {
            q1: vec![Primitive::I],
            q2: vec![Primitive::Cz],
        }),
        ..TwoQubitRb::new(3, 5, Generator::Cz)
    };
    let ctx = GeneratorContext::new(vec![Pulse::default(); 3]);
    let seq = build_sequence(&rb, &ctx, &SequenceOptions::default()).unwrap();
    for step in seq.steps() {
        assert!(step.gate(0).is_none() || step.has_readout());
        assert_ne!(step.gate(2), Some(&Gate::cz()));
    }
    assert!(seq.steps().iter().any(|s| s.gate(1) == Some(&Gate::cz())));
}

#[test]
fn test_simultaneous_single_qubit_rb_is_lockstep() {
    let rb = SingleQubitRb {
        qubits: vec![0, 2],
        ..SingleQubitRb::new(15, 9)
    };
    let ctx = GeneratorContext::new(vec![Pulse::default(); 3]);
    let seq = build_sequence(&rb, &ctx, &SequenceOptions::default()).unwrap();
    for step in &seq.steps()[..seq.len() - 1] {
        assert!(step.gate(0).is_some());
        assert!(step.gate(1).is_none());
        assert!(step.gate(2).is_some());
    }
}

proptest! {
    #[test]
    fn prop_any_single_qubit_word_is_recovered(word in prop::collection::vec(0usize..9, 0..30)) {
        let gates: Vec<Primitive> = word.into_iter().map(|k| Primitive::ALL[k]).collect();
        let u = clifford::evaluate_single(&gates);
        let opts = RecoveryOptions::default().with_cheapest(true);
        let rec = recover_single(&u, &opts).unwrap();
        prop_assert!((clifford::evaluate_single(&rec.sequence) * u).is_identity());
    }

    #[test]
    fn prop_stabilizer_key_ignores_global_phase(k in 0usize..N_CLIFFORD_2Q, phase in 0.0f64..6.28) {
        let u = clifford::two_qubit(k, Generator::Cz).unwrap().evaluate();
        let rot = Complex64::from_polar(1.0, phase);
        let state = u.first_column().map(|c| c * rot);
        prop_assert_eq!(
            qpulse_clifford::stabilizer::key(&u.first_column()),
            qpulse_clifford::stabilizer::key(&state)
        );
    }
}
