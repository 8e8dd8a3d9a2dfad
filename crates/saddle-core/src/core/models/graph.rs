use super::bonds::BondPair;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// An undirected molecular graph over atom indices.
///
/// Nodes are atom indices into the owning structure's ordered atom sequence.
/// Each edge carries an `active` flag marking it as part of the bond
/// rearrangement under study. The base connectivity is supplied externally;
/// this crate only augments it with active-bond annotations and truncation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MolecularGraph {
    adjacency: BTreeMap<usize, BTreeSet<usize>>,
    edges: BTreeMap<BondPair, bool>,
}

impl MolecularGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from an iterator of (inactive) bonds.
    pub fn from_bonds<I: IntoIterator<Item = BondPair>>(bonds: I) -> Self {
        let mut graph = Self::new();
        for bond in bonds {
            graph.add_edge(bond);
        }
        graph
    }

    /// Adds a node without any incident edges. Adding an existing node is a no-op.
    pub fn add_node(&mut self, atom_index: usize) {
        self.adjacency.entry(atom_index).or_default();
    }

    /// Adds an (inactive) edge, inserting its endpoints as nodes if absent.
    /// Re-adding an existing edge preserves its active flag.
    pub fn add_edge(&mut self, bond: BondPair) {
        self.adjacency.entry(bond.i()).or_default().insert(bond.j());
        self.adjacency.entry(bond.j()).or_default().insert(bond.i());
        self.edges.entry(bond).or_insert(false);
    }

    /// Returns true if the graph contains the given edge.
    pub fn contains_edge(&self, bond: BondPair) -> bool {
        self.edges.contains_key(&bond)
    }

    /// Marks an existing edge as active. Returns false if the edge is absent.
    pub fn set_active(&mut self, bond: BondPair) -> bool {
        match self.edges.get_mut(&bond) {
            Some(active) => {
                *active = true;
                true
            }
            None => false,
        }
    }

    /// Returns true if the edge exists and is marked active.
    pub fn is_active(&self, bond: BondPair) -> bool {
        self.edges.get(&bond).copied().unwrap_or(false)
    }

    /// All edges currently marked active, in index order.
    pub fn active_bonds(&self) -> Vec<BondPair> {
        self.edges
            .iter()
            .filter_map(|(bond, &active)| active.then_some(*bond))
            .collect()
    }

    /// The neighbors of a node, in index order. Empty for unknown nodes.
    pub fn neighbors(&self, atom_index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(&atom_index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All node indices in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.keys().copied()
    }

    /// All edges in the graph with their active flags, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (BondPair, bool)> + '_ {
        self.edges.iter().map(|(bond, &active)| (*bond, active))
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Annotates a graph with the full active-bond set of a rearrangement.
///
/// Inserts any bond missing from the graph and marks every supplied bond
/// active. Postcondition: the graph contains an edge for every pair in
/// `active_bonds`. Invoked exactly once, immediately after a transition
/// state is constructed, before any other operation may run.
pub fn annotate_active_bonds(graph: &mut MolecularGraph, active_bonds: &[BondPair]) {
    for &bond in active_bonds {
        graph.add_edge(bond);
        graph.set_active(bond);
    }
    info!(
        n_active = active_bonds.len(),
        "Molecular graph updated with active bonds"
    );
}

/// Returns the induced subgraph around the active bonds.
///
/// The truncated graph keeps every atom involved in an active bond, the
/// direct neighbors of those atoms, and all edges of the original graph
/// between the kept atoms. Active flags are preserved.
pub fn truncated_active_graph(graph: &MolecularGraph, active_bonds: &[BondPair]) -> MolecularGraph {
    let mut kept: BTreeSet<usize> = BTreeSet::new();
    for bond in active_bonds {
        kept.insert(bond.i());
        kept.insert(bond.j());
    }
    for bond in active_bonds {
        for endpoint in [bond.i(), bond.j()] {
            kept.extend(graph.neighbors(endpoint));
        }
    }

    let mut truncated = MolecularGraph::new();
    for &node in &kept {
        truncated.add_node(node);
    }
    for (bond, active) in graph.edges() {
        if kept.contains(&bond.i()) && kept.contains(&bond.j()) {
            truncated.add_edge(bond);
            if active {
                truncated.set_active(bond);
            }
        }
    }
    truncated
}
