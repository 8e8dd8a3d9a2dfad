//! # Core Module
//!
//! This module provides the fundamental building blocks for transition-state refinement
//! in SADDLE++, serving as the stateless foundation of the library.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different aspects
//! of the data model:
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bond rearrangements, the active-bond
//!   annotated molecular graph, conformers, and the transition state itself
//! - **Template Persistence** ([`templates`]) - The serialized transition-state template format
//! - **Geometry Utilities** ([`utils`]) - RMSD, distance constraints, and normal-mode displacement

pub mod models;
pub mod templates;
pub mod utils;
