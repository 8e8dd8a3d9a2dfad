//! Saddle-point validation: the TS optimization state machine.
//!
//! `opt_ts` drives the external backend towards a first-order saddle point.
//! A stationary point with exactly one imaginary frequency is a terminal
//! success. Zero imaginary frequencies is accepted as-is (an anomaly that
//! [`is_true_ts`] will later flag). More than one triggers a bounded
//! mode-correction retry loop: at most two extra attempts, displacing the
//! geometry along a fixed mode index by `+1` then `-1` before re-optimizing.

use super::calculation::{CalculationBackend, OptTsRequest};
use super::collaborators::ImagModeCheck;
use super::config::RefineConfig;
use super::error::EngineError;
use crate::core::models::transition_state::TransitionState;
use crate::core::utils::geometry::displaced_atoms_along_mode;
use tracing::{error, info, instrument, warn};

/// Runs one TS optimization attempt and applies its results.
///
/// On a complete record the TS geometry, energy, and imaginary frequencies
/// are replaced; on a record missing geometry or vibrational data they are
/// left exactly as before the call and the failure is logged. The
/// calculation handle is replaced wholesale either way.
fn run_opt_ts_attempt<B: CalculationBackend>(
    ts: &mut TransitionState,
    backend: &mut B,
    config: &RefineConfig,
    name_ext: &str,
) -> Result<(), EngineError> {
    if ts.atoms.is_empty() {
        return Err(EngineError::EmptyStructure);
    }

    let record = {
        let request = OptTsRequest {
            name: format!("{}_{}", ts.name, name_ext),
            atoms: &ts.atoms,
            charge: ts.charge,
            multiplicity: ts.multiplicity,
            solvent: ts.solvent.as_deref(),
            bonds_to_add: ts.bond_rearrangement().all(),
            n_cores: config.n_cores,
        };
        backend.run_opt_ts(&request)?
    };

    if record.is_complete() {
        if let Some(atoms) = &record.final_atoms {
            ts.atoms = atoms.clone();
        }
        ts.energy = record.energy;
        ts.imaginary_frequencies = record.imaginary_frequencies.clone();
    } else {
        error!("Transition state optimisation failed to return a geometry and normal modes");
    }
    ts.optts_calc = Some(record);

    Ok(())
}

/// Optimises the transition state to a first-order saddle point.
#[instrument(skip_all, fields(name = %ts.name, name_ext))]
pub fn opt_ts<B: CalculationBackend>(
    ts: &mut TransitionState,
    backend: &mut B,
    config: &RefineConfig,
    name_ext: &str,
) -> Result<(), EngineError> {
    info!("Optimising to a transition state");

    run_opt_ts_attempt(ts, backend, config, name_ext)?;

    if ts.imaginary_frequencies.len() == 1 {
        info!("Found a TS with a single imaginary frequency");
        return Ok(());
    }
    if ts.imaginary_frequencies.is_empty() {
        error!("Transition state optimisation did not return any imaginary frequencies");
        return Ok(());
    }

    // More than one imaginary frequency. Assume the most negative is the
    // correct mode and displace along the fixed mode index to shake off the
    // spurious one.
    for &magnitude in &config.displacement_magnitudes {
        let displaced = ts
            .optts_calc
            .as_ref()
            .and_then(|calc| calc.normal_modes.get(config.mode_index))
            .and_then(|mode| displaced_atoms_along_mode(&ts.atoms, mode, magnitude));

        let Some(atoms) = displaced else {
            warn!(
                mode_index = config.mode_index,
                "Mode displacement unavailable; stopping mode correction"
            );
            break;
        };

        ts.atoms = atoms;
        run_opt_ts_attempt(ts, backend, config, name_ext)?;

        if ts.imaginary_frequencies.len() == 1 {
            info!("Displacement along the spurious imaginary mode successful; now have one imaginary mode");
            break;
        }
    }

    Ok(())
}

/// Is this a 'true' TS: at least one imaginary mode, with a displacement
/// consistent with the bond rearrangement's forming/breaking pattern.
///
/// Pure query; depends only on the current imaginary frequencies and the
/// last calculation record.
pub fn is_true_ts<M: ImagModeCheck + ?Sized>(ts: &TransitionState, mode_check: &M) -> bool {
    if ts.imaginary_frequencies.is_empty() {
        return false;
    }

    match &ts.optts_calc {
        Some(calc) if mode_check.has_correct_imag_mode(ts.bond_rearrangement(), calc) => {
            info!("Transition state has the correct imaginary mode and links reactants to products");
            true
        }
        _ => false,
    }
}
