//! High-level workflow orchestration for transition-state refinement.
//!
//! This module composes the engine's validation, conformer search, and
//! template machinery into complete, user-facing procedures. Workflows own
//! the phase ordering and logging; all domain logic lives below them.

pub mod refine;
