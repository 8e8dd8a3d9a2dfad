use nalgebra::{Point3, Vector3};

/// Represents a single atom as an element symbol plus Cartesian coordinates.
///
/// Coordinates are in Angstroms. Atoms are identified positionally: every
/// structure in this crate refers to atoms by their index in an ordered
/// atom sequence, so an `Atom` carries no identity of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol (e.g., "C", "H", "Pd").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new atom from an element symbol and coordinates.
    pub fn new(element: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            element: element.to_string(),
            position: Point3::new(x, y, z),
        }
    }

    /// Returns the Euclidean distance to another atom in Angstroms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.position - other.position).norm()
    }

    /// Returns a copy of this atom translated by the given vector.
    pub fn displaced_by(&self, displacement: Vector3<f64>) -> Self {
        Self {
            element: self.element.clone(),
            position: self.position + displacement,
        }
    }
}
