use crate::core::models::atom::Atom;
use crate::core::models::bonds::BondPair;
use crate::core::models::calculation::NormalMode;
use std::collections::BTreeMap;

/// Root-mean-square deviation between two geometries' atomic positions.
///
/// Returns `None` if the geometries differ in length or are empty. No
/// alignment is performed; positions are compared index by index.
pub fn calculate_rmsd(atoms1: &[Atom], atoms2: &[Atom]) -> Option<f64> {
    if atoms1.len() != atoms2.len() || atoms1.is_empty() {
        return None;
    }
    let n = atoms1.len() as f64;
    let squared_dist_sum: f64 = atoms1
        .iter()
        .zip(atoms2.iter())
        .map(|(a, b)| (a.position - b.position).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Derives distance constraints from the active bonds at the current geometry.
///
/// Each valid bond pair is constrained to its currently measured distance.
/// Pairs whose indices fall outside the atom sequence are skipped.
pub fn distance_constraints(atoms: &[Atom], bonds: &[BondPair]) -> BTreeMap<BondPair, f64> {
    let mut constraints = BTreeMap::new();
    for &bond in bonds {
        if let (Some(a), Some(b)) = (atoms.get(bond.i()), atoms.get(bond.j())) {
            constraints.insert(bond, a.distance_to(b));
        }
    }
    constraints
}

/// Displaces a geometry along a normal mode by the given magnitude.
///
/// Returns `None` if the mode's displacement vectors do not match the atom
/// count, in which case the caller must treat the attempt as failed.
pub fn displaced_atoms_along_mode(
    atoms: &[Atom],
    mode: &NormalMode,
    magnitude: f64,
) -> Option<Vec<Atom>> {
    if mode.displacements.len() != atoms.len() {
        return None;
    }
    Some(
        atoms
            .iter()
            .zip(mode.displacements.iter())
            .map(|(atom, disp)| atom.displaced_by(disp * magnitude))
            .collect(),
    )
}
