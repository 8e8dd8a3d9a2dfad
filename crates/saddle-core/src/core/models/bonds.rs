use std::collections::BTreeSet;
use std::fmt;

/// An unordered pair of atom indices identifying a bond.
///
/// The pair is stored normalized (smaller index first) so that `(i, j)` and
/// `(j, i)` compare equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondPair(usize, usize);

impl BondPair {
    /// Creates a normalized bond pair from two atom indices.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// The smaller atom index.
    pub fn i(&self) -> usize {
        self.0
    }

    /// The larger atom index.
    pub fn j(&self) -> usize {
        self.1
    }

    /// Returns true if the pair involves the given atom index.
    pub fn contains(&self, atom_index: usize) -> bool {
        self.0 == atom_index || self.1 == atom_index
    }
}

impl fmt::Display for BondPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The set of bonds whose order changes between reactant and product.
///
/// A bond rearrangement is supplied externally and read-only thereafter: it is
/// set once when a [`super::transition_state::TransitionState`] is constructed
/// and never mutated. Forming and breaking bonds are kept separately, and
/// [`BondRearrangement::all`] yields both in a stable order (forming first).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BondRearrangement {
    fbonds: Vec<BondPair>,
    bbonds: Vec<BondPair>,
}

impl BondRearrangement {
    /// Creates a rearrangement from the bonds being formed and broken.
    pub fn new(fbonds: Vec<BondPair>, bbonds: Vec<BondPair>) -> Self {
        Self { fbonds, bbonds }
    }

    /// The bonds being formed.
    pub fn fbonds(&self) -> &[BondPair] {
        &self.fbonds
    }

    /// The bonds being broken.
    pub fn bbonds(&self) -> &[BondPair] {
        &self.bbonds
    }

    /// Every active bond: forming bonds followed by breaking bonds.
    pub fn all(&self) -> Vec<BondPair> {
        self.fbonds
            .iter()
            .chain(self.bbonds.iter())
            .copied()
            .collect()
    }

    /// Total number of active bonds.
    pub fn n_active(&self) -> usize {
        self.fbonds.len() + self.bbonds.len()
    }

    /// The set of atom indices involved in any active bond.
    pub fn active_atoms(&self) -> BTreeSet<usize> {
        self.all()
            .iter()
            .flat_map(|bond| [bond.i(), bond.j()])
            .collect()
    }
}
