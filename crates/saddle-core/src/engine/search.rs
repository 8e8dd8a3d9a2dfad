//! The lowest-energy conformer search and its rollback protocol.
//!
//! The search snapshots the TS state, lets the conformer machinery propose a
//! refined geometry, re-validates it as a saddle point, and commits the
//! result only if it is both a true TS and strictly lower in energy than the
//! snapshot. Anything else reverts atoms, energy, and the calculation handle
//! together, so the TS is never left as a mixture of old and new state.

use super::calculation::CalculationBackend;
use super::collaborators::{ConformerGenerator, ImagModeCheck, SimilarityFilter};
use super::config::RefineConfig;
use super::conformers;
use super::error::EngineError;
use super::validation;
use crate::core::models::atom::Atom;
use crate::core::models::transition_state::TransitionState;
use tracing::{info, instrument, warn};

/// Generates the conformer pool, optimizes each member under its distance
/// constraints, and adopts the lowest-energy geometry if it beats the
/// current one.
///
/// Conformers whose optimization returns no geometry or energy are skipped
/// with a warning and carry no energy afterwards.
#[instrument(skip_all, fields(name = %ts.name))]
pub fn find_lowest_energy_conformer<B, G, F>(
    ts: &mut TransitionState,
    backend: &mut B,
    generator: &G,
    filter: &F,
    config: &RefineConfig,
) -> Result<(), EngineError>
where
    B: CalculationBackend,
    G: ConformerGenerator,
    F: SimilarityFilter,
{
    conformers::generate(ts, generator, filter, config)?;

    // The pool stays on the TS while its members are optimized, so a backend
    // error part-way through leaves the conformers (and any energies already
    // set) in place.
    let mut best: Option<(f64, Vec<Atom>)> = None;
    for conformer in ts.conformers.iter_mut().flatten() {
        let record = backend.run_constrained_opt(conformer, config.n_cores)?;
        match (record.final_atoms, record.energy) {
            (Some(atoms), Some(energy)) => {
                conformer.atoms = atoms.clone();
                conformer.energy = Some(energy);
                if best.as_ref().is_none_or(|(e, _)| energy < *e) {
                    best = Some((energy, atoms));
                }
            }
            _ => warn!(
                conformer = %conformer.name,
                "Constrained optimisation returned no geometry or energy; skipping conformer"
            ),
        }
    }

    if let Some((energy, atoms)) = best {
        if ts.energy.is_none_or(|current| energy < current) {
            info!(energy, "Adopting lowest-energy conformer geometry");
            ts.atoms = atoms;
            ts.energy = Some(energy);
        }
    }

    Ok(())
}

/// Finds the lowest-energy TS conformer, committing or rolling back.
///
/// A single resulting conformer carries no discriminative information: the
/// search returns early without re-optimizing and the snapshot is discarded
/// (the current state is already equivalent). Otherwise the refined geometry
/// is re-optimized to a saddle point and committed only if `is_true_ts`
/// holds and the new energy is strictly below the snapshot energy.
#[instrument(skip_all, fields(name = %ts.name))]
pub fn find_lowest_energy_ts_conformer<B, G, F, M>(
    ts: &mut TransitionState,
    backend: &mut B,
    generator: &G,
    filter: &F,
    mode_check: &M,
    config: &RefineConfig,
) -> Result<(), EngineError>
where
    B: CalculationBackend,
    G: ConformerGenerator,
    F: SimilarityFilter,
    M: ImagModeCheck,
{
    let snapshot_atoms = ts.atoms.clone();
    let snapshot_energy = ts.energy;
    let snapshot_calc = ts.optts_calc.clone();

    find_lowest_energy_conformer(ts, backend, generator, filter, config)?;

    if ts.n_conformers() == 1 {
        warn!("Only found a single conformer; not re-running the TS optimisation");
        return Ok(());
    }

    validation::opt_ts(ts, backend, config, "optts_conf")?;

    let improved = validation::is_true_ts(ts, mode_check)
        && matches!(
            (ts.energy, snapshot_energy),
            (Some(new), Some(old)) if new < old
        );

    if improved {
        info!("Conformer search successful");
    } else {
        warn!("Transition state conformer search failed to improve the energy; reverting");
        ts.atoms = snapshot_atoms;
        ts.energy = snapshot_energy;
        ts.optts_calc = snapshot_calc;
    }

    Ok(())
}
