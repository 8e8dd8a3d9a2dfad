//! # SADDLE++ Core Library
//!
//! A library for validating and refining candidate transition-state geometries into
//! verified first-order saddle points, and for locating their lowest-energy conformers.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear separation of concerns,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`TransitionState`,
//!   `MolecularGraph`, `BondRearrangement`, `Conformer`), the on-disk transition-state
//!   template format, and pure geometry utilities (RMSD, mode displacement).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates the refinement process.
//!   It defines the collaborator contracts for external electronic-structure calculations,
//!   implements the saddle-point validation state machine with its bounded mode-correction
//!   retry loop, the conformer pool with geometric deduplication, and the energy-gated
//!   rollback protocol of the lowest-energy conformer search.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer. It ties the
//!   `engine` and `core` together to execute the complete refinement procedure, from a
//!   transition-state guess through validation, conformer search, and template export.

pub mod core;
pub mod engine;
pub mod workflows;
