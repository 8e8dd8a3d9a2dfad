use super::error::EngineError;
use crate::core::models::atom::Atom;
use crate::core::models::bonds::BondPair;
use crate::core::models::calculation::CalculationRecord;
use crate::core::models::conformer::Conformer;

/// A request for a transition-state optimization.
///
/// The full active-bond set is forwarded as bonds to constrain/add so the
/// backend keeps the rearranging bonds in its coordinate system.
#[derive(Debug, Clone)]
pub struct OptTsRequest<'a> {
    pub name: String,
    pub atoms: &'a [Atom],
    pub charge: i32,
    pub multiplicity: u32,
    pub solvent: Option<&'a str>,
    pub bonds_to_add: Vec<BondPair>,
    pub n_cores: usize,
}

/// The external electronic-structure calculation service.
///
/// Both methods block until the calculation completes or fails. A backend
/// signals an internal error by returning `Err`, which propagates to the
/// caller unchanged; an optimization that ran but produced no usable
/// geometry or vibrational data instead returns an incomplete
/// [`CalculationRecord`], which the engine degrades gracefully.
pub trait CalculationBackend {
    /// Runs a TS optimization (saddle-point search plus frequency analysis).
    fn run_opt_ts(&mut self, request: &OptTsRequest<'_>) -> Result<CalculationRecord, EngineError>;

    /// Runs a distance-constrained optimization of a single conformer.
    fn run_constrained_opt(
        &mut self,
        conformer: &Conformer,
        n_cores: usize,
    ) -> Result<CalculationRecord, EngineError>;
}
