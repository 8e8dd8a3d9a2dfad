//! # Engine Module
//!
//! This module implements the refinement engine for transition-state validation
//! in SADDLE++, orchestrating the interaction between the data models and the
//! external calculation service.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the refinement process:
//!
//! - **Configuration** ([`config`]) - Refinement parameters and the builder that validates them
//! - **Calculation Contract** ([`calculation`]) - The backend trait and optimization requests
//! - **Collaborators** ([`collaborators`]) - Trial-geometry generation, similarity filtering,
//!   and imaginary-mode correctness checks
//! - **Validation** ([`validation`]) - The saddle-point optimization state machine with its
//!   bounded mode-correction retry loop
//! - **Conformers** ([`conformers`]) - Conformer pool generation with geometric deduplication
//! - **Search** ([`search`]) - The lowest-energy conformer search with energy-gated rollback
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation

pub mod calculation;
pub mod collaborators;
pub mod config;
pub mod conformers;
pub mod error;
pub mod search;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;
