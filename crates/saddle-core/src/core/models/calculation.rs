use super::atom::Atom;
use nalgebra::Vector3;

/// A single vibrational normal mode from an optimization's frequency analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalMode {
    /// The mode frequency in wavenumbers; negative values denote imaginary modes.
    pub frequency: f64,
    /// Per-atom displacement vectors, ordered as the optimized atom sequence.
    pub displacements: Vec<Vector3<f64>>,
}

/// The read-only record of one external optimization attempt.
///
/// Produced by a calculation backend and consumed by the validation engine.
/// A transition state holds at most one record at a time; it is replaced
/// wholesale on each optimization attempt and never merged with prior
/// attempts' data.
///
/// Missing geometry (`final_atoms == None`) or missing vibrational data
/// (`normal_modes` empty) mark a failed extraction: the engine leaves the
/// transition state untouched for such attempts. An empty
/// `imaginary_frequencies` with non-empty `normal_modes` is a successful
/// attempt that found no imaginary mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalculationRecord {
    /// The optimized geometry, if the backend produced one.
    pub final_atoms: Option<Vec<Atom>>,
    /// The final electronic energy in Hartrees, if available.
    pub energy: Option<f64>,
    /// Imaginary frequencies in ascending order (most negative first).
    pub imaginary_frequencies: Vec<f64>,
    /// All normal modes in the backend's ordering, rigid-body modes included.
    pub normal_modes: Vec<NormalMode>,
}

impl CalculationRecord {
    /// True if both the geometry and the vibrational analysis were extracted.
    pub fn is_complete(&self) -> bool {
        self.final_atoms.is_some() && !self.normal_modes.is_empty()
    }
}
