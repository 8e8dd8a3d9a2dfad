//! Shared fixtures for engine tests: a scripted calculation backend and
//! record builders mimicking a backend's mode ordering (six rigid-body
//! modes first, then vibrational modes, imaginary ones leading).

use super::calculation::{CalculationBackend, OptTsRequest};
use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::bonds::{BondPair, BondRearrangement};
use crate::core::models::calculation::{CalculationRecord, NormalMode};
use crate::core::models::conformer::Conformer;
use crate::core::models::graph::MolecularGraph;
use crate::core::models::transition_state::{TransitionState, TsGuess};
use nalgebra::Vector3;
use std::collections::VecDeque;

pub(crate) struct ScriptedBackend {
    opt_ts_responses: VecDeque<CalculationRecord>,
    constrained_responses: VecDeque<CalculationRecord>,
    pub n_opt_ts_calls: usize,
    pub n_constrained_calls: usize,
}

impl ScriptedBackend {
    pub fn new(opt_ts_responses: Vec<CalculationRecord>) -> Self {
        Self {
            opt_ts_responses: opt_ts_responses.into(),
            constrained_responses: VecDeque::new(),
            n_opt_ts_calls: 0,
            n_constrained_calls: 0,
        }
    }

    pub fn with_constrained(mut self, responses: Vec<CalculationRecord>) -> Self {
        self.constrained_responses = responses.into();
        self
    }
}

impl CalculationBackend for ScriptedBackend {
    fn run_opt_ts(&mut self, request: &OptTsRequest<'_>) -> Result<CalculationRecord, EngineError> {
        self.n_opt_ts_calls += 1;
        self.opt_ts_responses
            .pop_front()
            .ok_or_else(|| EngineError::Backend {
                name: request.name.clone(),
                message: "no scripted opt_ts response left".to_string(),
            })
    }

    fn run_constrained_opt(
        &mut self,
        conformer: &Conformer,
        _n_cores: usize,
    ) -> Result<CalculationRecord, EngineError> {
        self.n_constrained_calls += 1;
        self.constrained_responses
            .pop_front()
            .ok_or_else(|| EngineError::Backend {
                name: conformer.name.clone(),
                message: "no scripted constrained response left".to_string(),
            })
    }
}

/// Three-atom geometry used across the engine tests.
pub(crate) fn test_atoms() -> Vec<Atom> {
    vec![
        Atom::new("C", 0.0, 0.0, 0.0),
        Atom::new("H", 1.5, 0.0, 0.0),
        Atom::new("Br", -2.2, 0.0, 0.0),
    ]
}

/// A transition state over [`test_atoms`] with a two-bond rearrangement.
pub(crate) fn test_ts() -> TransitionState {
    let guess = TsGuess {
        name: "fixture".to_string(),
        atoms: test_atoms(),
        charge: 0,
        multiplicity: 1,
        solvent: Some("water".to_string()),
        graph: MolecularGraph::from_bonds([BondPair::new(0, 1)]),
    };
    let rearrangement =
        BondRearrangement::new(vec![BondPair::new(0, 1)], vec![BondPair::new(0, 2)]);
    TransitionState::from_guess(guess, rearrangement)
}

/// Builds a complete record with the given imaginary-mode count.
///
/// Modes 0-5 are rigid-body placeholders, followed by `n_imag` imaginary
/// modes (most negative first, displacements on the active atoms) and one
/// real vibrational mode, so mode index 7 always exists.
pub(crate) fn record_with_imag(n_imag: usize, energy: f64, atoms: Vec<Atom>) -> CalculationRecord {
    let n_atoms = atoms.len();
    let rigid = NormalMode {
        frequency: 0.0,
        displacements: vec![Vector3::zeros(); n_atoms],
    };
    let mut normal_modes = vec![rigid; 6];

    let imaginary_frequencies: Vec<f64> =
        (0..n_imag).map(|k| -500.0 + 100.0 * k as f64).collect();
    for &frequency in &imaginary_frequencies {
        let mut displacements = vec![Vector3::zeros(); n_atoms];
        if n_atoms >= 2 {
            displacements[0] = Vector3::new(0.4, 0.0, 0.0);
            displacements[1] = Vector3::new(-0.4, 0.0, 0.0);
        }
        normal_modes.push(NormalMode {
            frequency,
            displacements,
        });
    }
    normal_modes.push(NormalMode {
        frequency: 1200.0,
        displacements: vec![Vector3::new(0.0, 0.1, 0.0); n_atoms],
    });

    CalculationRecord {
        final_atoms: Some(atoms),
        energy: Some(energy),
        imaginary_frequencies,
        normal_modes,
    }
}

/// A record whose geometry extraction failed (no final atoms).
pub(crate) fn record_without_geometry() -> CalculationRecord {
    let mut record = record_with_imag(1, -1.0, test_atoms());
    record.final_atoms = None;
    record
}

/// A record whose frequency analysis produced no vibrational data.
pub(crate) fn record_without_modes(energy: f64) -> CalculationRecord {
    CalculationRecord {
        final_atoms: Some(test_atoms()),
        energy: Some(energy),
        imaginary_frequencies: Vec::new(),
        normal_modes: Vec::new(),
    }
}
