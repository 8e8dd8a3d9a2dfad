//! The conformer pool: generation and geometric deduplication.
//!
//! Distance constraints are derived once per pool from the active bonds at
//! the current geometry and shared, read-only, across all trials. Trials are
//! independent and may fan out across threads (`parallel` feature); the
//! accept/reject decision is always made sequentially in index order so the
//! accepted set is deterministic.

use super::collaborators::{ConformerGenerator, SimilarityFilter};
use super::config::RefineConfig;
use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::conformer::Conformer;
use crate::core::models::transition_state::TransitionState;
use crate::core::utils::geometry::distance_constraints;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Generates up to `config.n_confs` deduplicated conformers at the TS.
///
/// Accepted conformers receive the TS solvent and a deep copy of the TS
/// graph, and are stored on the TS in generation-index order, replacing any
/// previous pool. Returns the number accepted. No accepted conformer is
/// removed once added within a single call.
#[instrument(skip_all, fields(name = %ts.name, n_confs = config.n_confs))]
pub fn generate<G, F>(
    ts: &mut TransitionState,
    generator: &G,
    filter: &F,
    config: &RefineConfig,
) -> Result<usize, EngineError>
where
    G: ConformerGenerator,
    F: SimilarityFilter,
{
    let dist_consts = distance_constraints(&ts.atoms, &ts.bond_rearrangement().all());

    #[cfg(feature = "parallel")]
    let trials: Vec<Result<Vec<Atom>, EngineError>> = {
        let ts_ref: &TransitionState = ts;
        (0..config.n_confs)
            .into_par_iter()
            .map(|i| generator.trial_atoms(ts_ref, &dist_consts, i))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let trials: Vec<Result<Vec<Atom>, EngineError>> = (0..config.n_confs)
        .map(|i| generator.trial_atoms(ts, &dist_consts, i))
        .collect();

    let mut accepted: Vec<Conformer> = Vec::new();
    for (i, trial) in trials.into_iter().enumerate() {
        let atoms = trial?;
        let mut conformer = Conformer::new(
            format!("{}_conf{}", ts.name, i),
            atoms,
            dist_consts.clone(),
            ts.charge,
            ts.multiplicity,
        );

        if filter.is_distinct(&conformer, &accepted) {
            conformer.solvent = ts.solvent.clone();
            conformer.graph = ts.graph.clone();
            accepted.push(conformer);
        }
    }

    info!(n_accepted = accepted.len(), "Generated conformer(s)");

    let n_accepted = accepted.len();
    ts.conformers = Some(accepted);
    Ok(n_accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bonds::BondPair;
    use crate::engine::collaborators::RmsdFilter;
    use crate::engine::config::RefineConfigBuilder;
    use crate::engine::test_support::test_ts;
    use nalgebra::Vector3;
    use std::collections::BTreeMap;

    /// Shifts the whole geometry along x by a per-trial amount.
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

    fn config(n_confs: usize) -> RefineConfig {
        RefineConfigBuilder::new().n_confs(n_confs).build().unwrap()
    }

    #[test]
    fn near_duplicate_trials_are_rejected_in_index_order() {
        let mut ts = test_ts();
        // Trials 2 and 3 are within the RMSD threshold of trials 0 and 1.
        let generator = ShiftGenerator {
            shifts: vec![0.0, 5.0, 0.05, 5.02, 10.0],
        };
        let filter = RmsdFilter { threshold: 0.3 };

        let n = generate(&mut ts, &generator, &filter, &config(5)).unwrap();

        assert_eq!(n, 3);
        let conformers = ts.conformers.as_ref().unwrap();
        let names: Vec<&str> = conformers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["TS_fixture_conf0", "TS_fixture_conf1", "TS_fixture_conf4"]
        );
    }

    #[test]
    fn pool_never_exceeds_requested_trials() {
        let mut ts = test_ts();
        let generator = ShiftGenerator {
            shifts: (0..20).map(|i| i as f64 * 3.0).collect(),
        };
        let filter = RmsdFilter { threshold: 0.3 };

        let n = generate(&mut ts, &generator, &filter, &config(7)).unwrap();

        assert!(n <= 7);
        assert_eq!(ts.n_conformers(), n);
    }

    #[test]
    fn accepted_conformers_inherit_solvent_and_graph_copy() {
        let mut ts = test_ts();
        let generator = ShiftGenerator { shifts: vec![0.0] };
        let filter = RmsdFilter { threshold: 0.3 };

        generate(&mut ts, &generator, &filter, &config(1)).unwrap();

        let conformer = &ts.conformers.as_ref().unwrap()[0];
        assert_eq!(conformer.solvent, ts.solvent);
        assert_eq!(conformer.graph, ts.graph);
        assert_eq!(conformer.charge, ts.charge);
        assert_eq!(conformer.multiplicity, ts.multiplicity);
    }

    #[test]
    fn constraints_are_derived_from_active_bonds_once_per_pool() {
        let mut ts = test_ts();
        let generator = ShiftGenerator {
            shifts: vec![0.0, 6.0],
        };
        let filter = RmsdFilter { threshold: 0.3 };

        generate(&mut ts, &generator, &filter, &config(2)).unwrap();

        let expected =
            distance_constraints(&ts.atoms, &ts.bond_rearrangement().all());
        for conformer in ts.conformers.as_ref().unwrap() {
            assert_eq!(conformer.dist_consts, expected);
        }
    }

    #[test]
    fn generate_replaces_any_previous_pool() {
        let mut ts = test_ts();
        let filter = RmsdFilter { threshold: 0.3 };

        let wide = ShiftGenerator {
            shifts: vec![0.0, 5.0, 10.0],
        };
        generate(&mut ts, &wide, &filter, &config(3)).unwrap();
        assert_eq!(ts.n_conformers(), 3);

        let narrow = ShiftGenerator { shifts: vec![0.0] };
        generate(&mut ts, &narrow, &filter, &config(3)).unwrap();
        assert_eq!(ts.n_conformers(), 1);
    }
}
