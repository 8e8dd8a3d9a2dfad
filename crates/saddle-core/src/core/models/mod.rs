//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent transition
//! states and their surroundings in SADDLE++.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with element symbol and coordinates
//! - [`bonds`] - Atom-index bond pairs and the bond rearrangement under study
//! - [`graph`] - The molecular graph with active-bond annotations and truncation
//! - [`calculation`] - The read-only record returned by an external optimization attempt
//! - [`conformer`] - Alternative spatial arrangements generated under distance constraints
//! - [`transition_state`] - The transition state owning the graph, rearrangement, and results

pub mod atom;
pub mod bonds;
pub mod calculation;
pub mod conformer;
pub mod graph;
pub mod transition_state;
