//! Collaborator contracts for the refinement engine.
//!
//! These traits are the seams where external capabilities plug in: trial
//! geometry generation for the conformer pool, RMSD-based similarity testing
//! for deduplication, and the imaginary-mode correctness check used to
//! classify a stationary point as a true transition state. Built-in
//! implementations are provided for each.

use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::bonds::{BondPair, BondRearrangement};
use crate::core::models::calculation::CalculationRecord;
use crate::core::models::conformer::Conformer;
use crate::core::models::transition_state::TransitionState;
use crate::core::utils::geometry::calculate_rmsd;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Produces trial atom sets for the conformer pool.
///
/// The trial index seeds the generator so that a pool is reproducible and
/// its trials are diverse. Implementations must be `Sync`: with the
/// `parallel` feature the pool fans trials out across threads.
pub trait ConformerGenerator: Sync {
    fn trial_atoms(
        &self,
        ts: &TransitionState,
        dist_consts: &BTreeMap<BondPair, f64>,
        trial: usize,
    ) -> Result<Vec<Atom>, EngineError>;
}

/// Decides whether a candidate conformer is geometrically distinct from the
/// conformers already accepted into the pool.
pub trait SimilarityFilter {
    fn is_distinct(&self, candidate: &Conformer, accepted: &[Conformer]) -> bool;
}

/// Confirms that the dominant imaginary mode's atomic displacement is
/// consistent with the bond-forming/breaking pattern of a rearrangement.
pub trait ImagModeCheck {
    fn has_correct_imag_mode(
        &self,
        rearrangement: &BondRearrangement,
        calc: &CalculationRecord,
    ) -> bool;
}

/// Built-in trial generator: seeded random displacement with constraint repair.
///
/// Every atom is displaced by a uniform random vector, then each constrained
/// pair is restored to its target distance by sliding the second atom along
/// the pair axis. Trials are deterministic per (seed, index).
#[derive(Debug, Clone)]
pub struct RandomDisplacementGenerator {
    /// Maximum per-coordinate displacement in Angstroms.
    pub max_displacement: f64,
    /// Base seed; the trial index is added to it.
    pub seed: u64,
}

impl Default for RandomDisplacementGenerator {
    fn default() -> Self {
        Self {
            max_displacement: 1.0,
            seed: 0,
        }
    }
}

impl ConformerGenerator for RandomDisplacementGenerator {
    fn trial_atoms(
        &self,
        ts: &TransitionState,
        dist_consts: &BTreeMap<BondPair, f64>,
        trial: usize,
    ) -> Result<Vec<Atom>, EngineError> {
        if ts.atoms.is_empty() {
            return Err(EngineError::TrialGeneration {
                trial,
                message: "transition state has no atoms".to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(trial as u64));
        let d = self.max_displacement;
        let mut atoms: Vec<Atom> = ts
            .atoms
            .iter()
            .map(|atom| {
                atom.displaced_by(Vector3::new(
                    rng.gen_range(-d..=d),
                    rng.gen_range(-d..=d),
                    rng.gen_range(-d..=d),
                ))
            })
            .collect();

        for (&bond, &target) in dist_consts {
            let (i, j) = (bond.i(), bond.j());
            if j >= atoms.len() {
                continue;
            }
            let axis = atoms[j].position - atoms[i].position;
            let norm = axis.norm();
            if norm <= f64::EPSILON {
                continue;
            }
            atoms[j].position = atoms[i].position + axis * (target / norm);
        }

        Ok(atoms)
    }
}

/// Built-in similarity filter: a candidate is distinct if its RMSD to every
/// accepted conformer exceeds the threshold.
#[derive(Debug, Clone)]
pub struct RmsdFilter {
    /// Minimum RMSD (Angstroms) to every accepted conformer.
    pub threshold: f64,
}

impl SimilarityFilter for RmsdFilter {
    fn is_distinct(&self, candidate: &Conformer, accepted: &[Conformer]) -> bool {
        accepted.iter().all(|existing| {
            calculate_rmsd(&candidate.atoms, &existing.atoms)
                .map_or(true, |rmsd| rmsd > self.threshold)
        })
    }
}

/// Built-in imaginary-mode check: the dominant (most negative) imaginary
/// mode must carry at least `min_active_contribution` of its displacement
/// norm on the atoms involved in the rearrangement.
#[derive(Debug, Clone)]
pub struct DisplacementModeCheck {
    pub min_active_contribution: f64,
}

impl Default for DisplacementModeCheck {
    fn default() -> Self {
        Self {
            min_active_contribution: 0.25,
        }
    }
}

impl ImagModeCheck for DisplacementModeCheck {
    fn has_correct_imag_mode(
        &self,
        rearrangement: &BondRearrangement,
        calc: &CalculationRecord,
    ) -> bool {
        let dominant = calc
            .normal_modes
            .iter()
            .filter(|mode| mode.frequency < 0.0)
            .min_by(|a, b| {
                a.frequency
                    .partial_cmp(&b.frequency)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let Some(mode) = dominant else {
            return false;
        };

        let total: f64 = mode.displacements.iter().map(|d| d.norm()).sum();
        if total <= f64::EPSILON {
            return false;
        }

        let active_atoms = rearrangement.active_atoms();
        let active: f64 = mode
            .displacements
            .iter()
            .enumerate()
            .filter(|(index, _)| active_atoms.contains(index))
            .map(|(_, d)| d.norm())
            .sum();

        active / total >= self.min_active_contribution
    }
}
