//! The end-to-end transition-state refinement workflow.
//!
//! Given a guess geometry and its bond rearrangement, the workflow optimizes
//! to a first-order saddle point, searches the conformer pool for a lower
//! energy TS, and, when the result is a true TS, exports a reusable template
//! of its active-bond neighborhood.

use crate::core::models::bonds::BondRearrangement;
use crate::core::models::graph::truncated_active_graph;
use crate::core::models::transition_state::{TransitionState, TsGuess};
use crate::core::templates::TsTemplate;
use crate::engine::calculation::CalculationBackend;
use crate::engine::collaborators::{ConformerGenerator, ImagModeCheck, RmsdFilter};
use crate::engine::config::RefineConfig;
use crate::engine::error::EngineError;
use crate::engine::{search, validation};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// The result of a refinement run.
#[derive(Debug)]
pub struct RefineOutcome {
    /// The refined transition state, conformers and calculation handle included.
    pub ts: TransitionState,
    /// Whether the final state passed the imaginary-mode check.
    pub is_true_ts: bool,
    /// Number of imaginary frequencies at the final geometry.
    pub n_imaginary_modes: usize,
    /// Path of the exported template, if one was written.
    pub template_path: Option<PathBuf>,
}

/// Runs the full refinement: saddle-point optimization, conformer search,
/// and template export.
///
/// Conformer deduplication uses an [`RmsdFilter`] at the configured
/// `rmsd_threshold`. A template is written only when the final state is a
/// true TS and `config.template_folder` is set. A state that fails the mode
/// check is still returned in full so the caller can inspect it.
#[instrument(skip_all, fields(name = %guess.name))]
pub fn run<B, G, M>(
    guess: TsGuess,
    rearrangement: BondRearrangement,
    backend: &mut B,
    generator: &G,
    mode_check: &M,
    config: &RefineConfig,
) -> Result<RefineOutcome, EngineError>
where
    B: CalculationBackend,
    G: ConformerGenerator,
    M: ImagModeCheck,
{
    let mut ts = TransitionState::from_guess(guess, rearrangement);
    let filter = RmsdFilter {
        threshold: config.rmsd_threshold,
    };

    info!("Phase 1: optimizing to a first-order saddle point");
    validation::opt_ts(&mut ts, backend, config, "optts")?;

    info!("Phase 2: searching for a lower-energy TS conformer");
    search::find_lowest_energy_ts_conformer(
        &mut ts,
        backend,
        generator,
        &filter,
        mode_check,
        config,
    )?;

    let is_true_ts = validation::is_true_ts(&ts, mode_check);
    let n_imaginary_modes = ts.imaginary_frequencies.len();

    let template_path = match (&config.template_folder, is_true_ts) {
        (Some(folder), true) => {
            info!("Phase 3: exporting the TS template");
            Some(save_ts_template(&ts, folder)?)
        }
        (Some(_), false) => {
            warn!("Final state is not a true TS; no template written");
            None
        }
        (None, _) => None,
    };

    Ok(RefineOutcome {
        ts,
        is_true_ts,
        n_imaginary_modes,
        template_path,
    })
}

/// Exports the TS as a reusable template into `folder`.
///
/// The template holds the truncated active graph with each active bond
/// stamped with its distance at the current geometry. Active bonds whose
/// atom indices fall outside the geometry carry no distance.
pub fn save_ts_template(ts: &TransitionState, folder: &Path) -> Result<PathBuf, EngineError> {
    let active_bonds = ts.bond_rearrangement().all();
    let truncated = truncated_active_graph(&ts.graph, &active_bonds);

    let mut distances = BTreeMap::new();
    for bond in active_bonds {
        if let Some(distance) = ts.distance(bond) {
            distances.insert(bond, distance);
        }
    }

    let template = TsTemplate::from_truncated_graph(
        &ts.name,
        &truncated,
        &ts.atoms,
        &distances,
        ts.solvent.clone(),
        ts.charge,
        ts.multiplicity,
    );
    let path = template.save(folder)?;
    info!(path = %path.display(), "Saved TS template");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::bonds::BondPair;
    use crate::core::models::graph::MolecularGraph;
    use crate::engine::collaborators::DisplacementModeCheck;
    use crate::engine::config::RefineConfigBuilder;
    use crate::engine::test_support::{ScriptedBackend, record_with_imag, record_without_modes};
    use nalgebra::Vector3;
    use tempfile::TempDir;

    struct ShiftGenerator {
        shifts: Vec<f64>,
    }

    impl ConformerGenerator for ShiftGenerator {
        fn trial_atoms(
            &self,
            ts: &TransitionState,
            _dist_consts: &BTreeMap<BondPair, f64>,
            trial: usize,
        ) -> Result<Vec<Atom>, EngineError> {
            let shift = self.shifts[trial % self.shifts.len()];
            Ok(ts
                .atoms
                .iter()
                .map(|a| a.displaced_by(Vector3::new(shift, 0.0, 0.0)))
                .collect())
        }
    }

    fn sn2_guess() -> (TsGuess, BondRearrangement) {
        let guess = TsGuess {
            name: "sn2".to_string(),
            atoms: vec![
                Atom::new("C", 0.0, 0.0, 0.0),
                Atom::new("H", 1.5, 0.0, 0.0),
                Atom::new("Br", -2.2, 0.0, 0.0),
            ],
            charge: -1,
            multiplicity: 1,
            solvent: Some("water".to_string()),
            graph: MolecularGraph::from_bonds([BondPair::new(0, 1)]),
        };
        let rearrangement =
            BondRearrangement::new(vec![BondPair::new(0, 1)], vec![BondPair::new(0, 2)]);
        (guess, rearrangement)
    }

    fn atoms() -> Vec<Atom> {
        sn2_guess().0.atoms
    }

    #[test]
    fn full_refinement_commits_and_exports_a_template() {
        let dir = TempDir::new().unwrap();
        let (guess, rearrangement) = sn2_guess();
        let config = RefineConfigBuilder::new()
            .n_confs(3)
            .template_folder(dir.path().to_path_buf())
            .build()
            .unwrap();

        let mut backend = ScriptedBackend::new(vec![
            record_with_imag(1, -2.5, atoms()),
            record_with_imag(1, -3.0, atoms()),
        ])
        .with_constrained(vec![
            record_without_modes(-2.6),
            record_without_modes(-2.4),
            record_without_modes(-2.55),
        ]);

        let generator = ShiftGenerator {
            shifts: vec![0.0, 5.0, 10.0],
        };
        let outcome = run(
            guess,
            rearrangement,
            &mut backend,
            &generator,
            &DisplacementModeCheck::default(),
            &config,
        )
        .unwrap();

        assert!(outcome.is_true_ts);
        assert_eq!(outcome.n_imaginary_modes, 1);
        assert_eq!(outcome.ts.name, "TS_sn2");
        assert_eq!(outcome.ts.energy, Some(-3.0));

        let path = outcome.template_path.expect("template should be written");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "TS_sn2_template.toml"
        );
        let template = TsTemplate::load(&path).unwrap();
        assert_eq!(template.charge, -1);
        assert_eq!(template.solvent.as_deref(), Some("water"));
        assert!(
            template
                .bonds
                .iter()
                .filter(|b| b.active)
                .all(|b| b.distance.is_some())
        );
    }

    #[test]
    fn no_template_is_written_for_an_invalid_ts() {
        let dir = TempDir::new().unwrap();
        let (guess, rearrangement) = sn2_guess();
        let config = RefineConfigBuilder::new()
            .n_confs(2)
            .template_folder(dir.path().to_path_buf())
            .build()
            .unwrap();

        // Zero imaginary modes throughout; the single-conformer pool skips
        // the re-optimization.
        let mut backend = ScriptedBackend::new(vec![record_with_imag(0, -2.5, atoms())])
            .with_constrained(vec![record_without_modes(-2.0)]);

        let generator = ShiftGenerator { shifts: vec![0.0] };
        let outcome = run(
            guess,
            rearrangement,
            &mut backend,
            &generator,
            &DisplacementModeCheck::default(),
            &config,
        )
        .unwrap();

        assert!(!outcome.is_true_ts);
        assert_eq!(outcome.n_imaginary_modes, 0);
        assert!(outcome.template_path.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn configured_rmsd_threshold_governs_deduplication() {
        // Trials 5 Angstroms apart are distinct at the default threshold but
        // redundant at 100: the pool collapses to one conformer and the
        // search returns without a second TS optimization.
        let (guess, rearrangement) = sn2_guess();
        let config = RefineConfigBuilder::new()
            .n_confs(3)
            .rmsd_threshold(100.0)
            .build()
            .unwrap();

        let mut backend = ScriptedBackend::new(vec![record_with_imag(1, -2.5, atoms())])
            .with_constrained(vec![record_without_modes(-2.0)]);

        let generator = ShiftGenerator {
            shifts: vec![0.0, 5.0, 10.0],
        };
        let outcome = run(
            guess,
            rearrangement,
            &mut backend,
            &generator,
            &DisplacementModeCheck::default(),
            &config,
        )
        .unwrap();

        assert_eq!(outcome.ts.n_conformers(), 1);
        assert_eq!(backend.n_constrained_calls, 1);
        assert_eq!(backend.n_opt_ts_calls, 1);
    }

    #[test]
    fn template_distances_track_the_final_geometry() {
        let (guess, rearrangement) = sn2_guess();
        let ts = TransitionState::from_guess(guess, rearrangement);

        let dir = TempDir::new().unwrap();
        let path = save_ts_template(&ts, dir.path()).unwrap();
        let template = TsTemplate::load(&path).unwrap();

        let forming = template
            .bonds
            .iter()
            .find(|b| (b.i, b.j) == (0, 2))
            .unwrap();
        assert!(forming.active);
        assert!((forming.distance.unwrap() - 2.2).abs() < 1e-12);
    }
}
