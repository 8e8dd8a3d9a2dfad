use super::atom::Atom;
use super::bonds::BondPair;
use super::graph::MolecularGraph;
use std::collections::BTreeMap;

/// An alternative spatial arrangement of a transition state's atoms.
///
/// Conformers are created by the conformer pool under the distance constraints
/// derived from the active bonds, discarded if geometrically redundant, and
/// otherwise retained on the parent transition state for the lifetime of the
/// search. A conformer's graph is a deep copy of the parent graph: conformers
/// share no mutable state with their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    pub name: String,
    pub atoms: Vec<Atom>,
    /// Target distances for the active bonds, fixed for the whole pool.
    pub dist_consts: BTreeMap<BondPair, f64>,
    pub charge: i32,
    pub multiplicity: u32,
    pub solvent: Option<String>,
    pub graph: MolecularGraph,
    /// Set once the conformer has been through a constrained optimization.
    pub energy: Option<f64>,
}

impl Conformer {
    /// Creates an unoptimized conformer with no solvent and an empty graph.
    ///
    /// The solvent and the parent graph copy are attached by the pool once
    /// the conformer passes the similarity check.
    pub fn new(
        name: String,
        atoms: Vec<Atom>,
        dist_consts: BTreeMap<BondPair, f64>,
        charge: i32,
        multiplicity: u32,
    ) -> Self {
        Self {
            name,
            atoms,
            dist_consts,
            charge,
            multiplicity,
            solvent: None,
            graph: MolecularGraph::new(),
            energy: None,
        }
    }
}
