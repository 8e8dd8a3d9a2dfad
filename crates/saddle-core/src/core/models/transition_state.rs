use super::atom::Atom;
use super::bonds::{BondPair, BondRearrangement};
use super::calculation::CalculationRecord;
use super::conformer::Conformer;
use super::graph::{self, MolecularGraph};

/// A candidate transition-state geometry prior to refinement.
///
/// Carries the trial coordinates together with the base molecular graph and
/// electronic-state metadata. Consumed by [`TransitionState::from_guess`].
#[derive(Debug, Clone, PartialEq)]
pub struct TsGuess {
    pub name: String,
    pub atoms: Vec<Atom>,
    pub charge: i32,
    pub multiplicity: u32,
    pub solvent: Option<String>,
    pub graph: MolecularGraph,
}

/// Explicit-solvent coordinates attached to a solvated transition state.
///
/// Optional extension record; no refinement behavior currently depends on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolvationShell {
    pub qm_solvent_atoms: Vec<Atom>,
    pub mm_solvent_atoms: Vec<Atom>,
}

/// A transition state under validation and refinement.
///
/// Owns its bond rearrangement and graph. The rearrangement is set once at
/// construction and never mutated; construction immediately annotates the
/// graph so that it contains an edge for every active bond. The calculation
/// record is replaced wholesale on each optimization attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionState {
    pub name: String,
    pub atoms: Vec<Atom>,
    pub charge: i32,
    pub multiplicity: u32,
    pub solvent: Option<String>,
    bond_rearrangement: BondRearrangement,
    pub graph: MolecularGraph,
    /// The last accepted electronic energy in Hartrees.
    pub energy: Option<f64>,
    /// Imaginary frequencies of the last successful optimization attempt.
    pub imaginary_frequencies: Vec<f64>,
    /// Handle to the most recent calculation record.
    pub optts_calc: Option<CalculationRecord>,
    /// Conformers found by the pool; `None` until generated.
    pub conformers: Option<Vec<Conformer>>,
    /// Optional explicit-solvent extension.
    pub solvation_shell: Option<SolvationShell>,
}

impl TransitionState {
    /// Constructs a transition state from a guess and its bond rearrangement.
    ///
    /// The graph is annotated with the rearrangement's full active-bond set
    /// before the constructor returns; every other operation relies on this.
    pub fn from_guess(guess: TsGuess, bond_rearrangement: BondRearrangement) -> Self {
        let mut graph = guess.graph;
        graph::annotate_active_bonds(&mut graph, &bond_rearrangement.all());

        Self {
            name: format!("TS_{}", guess.name),
            atoms: guess.atoms,
            charge: guess.charge,
            multiplicity: guess.multiplicity,
            solvent: guess.solvent,
            bond_rearrangement,
            graph,
            energy: None,
            imaginary_frequencies: Vec::new(),
            optts_calc: None,
            conformers: None,
            solvation_shell: None,
        }
    }

    /// The bond rearrangement this transition state connects.
    pub fn bond_rearrangement(&self) -> &BondRearrangement {
        &self.bond_rearrangement
    }

    /// Measures the current distance of a bond pair, if both indices are valid.
    pub fn distance(&self, bond: BondPair) -> Option<f64> {
        let a = self.atoms.get(bond.i())?;
        let b = self.atoms.get(bond.j())?;
        Some(a.distance_to(b))
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Number of conformers currently held, zero if none were generated.
    pub fn n_conformers(&self) -> usize {
        self.conformers.as_ref().map_or(0, |confs| confs.len())
    }
}
