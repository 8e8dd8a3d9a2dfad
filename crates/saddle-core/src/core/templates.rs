//! The serialized transition-state template format.
//!
//! A template is a truncated copy of the active-bond graph with each active
//! edge stamped with its measured interatomic distance, packaged together
//! with the solvent, charge, and multiplicity of the transition state it was
//! taken from. Templates are created once at save time, immutable thereafter,
//! and persisted as TOML for reuse in later searches.

use super::models::atom::Atom;
use super::models::bonds::BondPair;
use super::models::graph::MolecularGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to serialize template: {source}")]
    Serialize {
        #[from]
        source: toml::ser::Error,
    },

    #[error("Failed to deserialize template: {source}")]
    Deserialize {
        #[from]
        source: toml::de::Error,
    },
}

/// A node of the truncated graph: the original atom index and its element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateNode {
    pub index: usize,
    pub element: String,
}

/// An edge of the truncated graph; active edges carry a measured distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBond {
    pub i: usize,
    pub j: usize,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// A reusable transition-state template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsTemplate {
    pub name: String,
    pub charge: i32,
    pub multiplicity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solvent: Option<String>,
    pub nodes: Vec<TemplateNode>,
    pub bonds: Vec<TemplateBond>,
}

impl TsTemplate {
    /// Builds a template from an already-truncated active graph.
    ///
    /// `atoms` is the full atom sequence of the parent transition state; node
    /// indices of the truncated graph index into it. `distances` carries the
    /// measured lengths of the active bonds.
    pub fn from_truncated_graph(
        name: &str,
        graph: &MolecularGraph,
        atoms: &[Atom],
        distances: &BTreeMap<BondPair, f64>,
        solvent: Option<String>,
        charge: i32,
        multiplicity: u32,
    ) -> Self {
        let nodes = graph
            .nodes()
            .map(|index| TemplateNode {
                index,
                element: atoms
                    .get(index)
                    .map_or_else(|| "X".to_string(), |atom| atom.element.clone()),
            })
            .collect();

        let bonds = graph
            .edges()
            .map(|(bond, active)| TemplateBond {
                i: bond.i(),
                j: bond.j(),
                active,
                distance: distances.get(&bond).copied(),
            })
            .collect();

        Self {
            name: name.to_string(),
            charge,
            multiplicity,
            solvent,
            nodes,
            bonds,
        }
    }

    /// Persists this template as `<name>_template.toml` inside `folder`.
    ///
    /// The folder is created if it does not exist. Returns the path written.
    pub fn save(&self, folder: &Path) -> Result<PathBuf, TemplateError> {
        fs::create_dir_all(folder)?;
        let path = folder.join(format!("{}_template.toml", self.name));
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Loads a template previously written by [`TsTemplate::save`].
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
