//! Utility functions for the core module.
//!
//! This module provides pure geometric helpers used throughout the refinement
//! process: RMSD between geometries, distance-constraint derivation from the
//! active bonds, and displacement of a geometry along a normal mode.

pub mod geometry;
