use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },
}

/// Parameters governing a transition-state refinement.
///
/// Replaces any global mutable configuration: the caller resolves defaults
/// once at the call boundary via [`RefineConfigBuilder`] and passes the
/// resulting value explicitly into every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineConfig {
    /// Number of conformer trials requested from the pool.
    pub n_confs: usize,
    /// Fixed normal-mode index used by the mode-correction retry loop.
    ///
    /// Mode 7 is the first mode after the six rigid-body modes of a
    /// non-linear system. This is a structural assumption about the
    /// backend's mode ordering, not a recomputed selection; when more
    /// than one imaginary mode is present the most negative is assumed
    /// to be the correct one.
    pub mode_index: usize,
    /// Displacement magnitudes tried, in order, by the retry loop.
    pub displacement_magnitudes: [f64; 2],
    /// Conformers closer than this RMSD (Angstroms) are deemed redundant.
    pub rmsd_threshold: f64,
    /// Core count forwarded to the calculation backend.
    pub n_cores: usize,
    /// Folder for transition-state template export; no export if unset.
    pub template_folder: Option<PathBuf>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            n_confs: 300,
            mode_index: 7,
            displacement_magnitudes: [1.0, -1.0],
            rmsd_threshold: 0.3,
            n_cores: 4,
            template_folder: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RefineConfigBuilder {
    n_confs: Option<usize>,
    mode_index: Option<usize>,
    displacement_magnitudes: Option<[f64; 2]>,
    rmsd_threshold: Option<f64>,
    n_cores: Option<usize>,
    template_folder: Option<PathBuf>,
}

impl RefineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_confs(mut self, n: usize) -> Self {
        self.n_confs = Some(n);
        self
    }
    pub fn mode_index(mut self, index: usize) -> Self {
        self.mode_index = Some(index);
        self
    }
    pub fn displacement_magnitudes(mut self, magnitudes: [f64; 2]) -> Self {
        self.displacement_magnitudes = Some(magnitudes);
        self
    }
    pub fn rmsd_threshold(mut self, threshold: f64) -> Self {
        self.rmsd_threshold = Some(threshold);
        self
    }
    pub fn n_cores(mut self, n: usize) -> Self {
        self.n_cores = Some(n);
        self
    }
    pub fn template_folder(mut self, folder: PathBuf) -> Self {
        self.template_folder = Some(folder);
        self
    }

    pub fn build(self) -> Result<RefineConfig, ConfigError> {
        let defaults = RefineConfig::default();
        let config = RefineConfig {
            n_confs: self.n_confs.unwrap_or(defaults.n_confs),
            mode_index: self.mode_index.unwrap_or(defaults.mode_index),
            displacement_magnitudes: self
                .displacement_magnitudes
                .unwrap_or(defaults.displacement_magnitudes),
            rmsd_threshold: self.rmsd_threshold.unwrap_or(defaults.rmsd_threshold),
            n_cores: self.n_cores.unwrap_or(defaults.n_cores),
            template_folder: self.template_folder,
        };

        if config.n_confs == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "n_confs",
                message: "at least one conformer trial is required".to_string(),
            });
        }
        if config.rmsd_threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "rmsd_threshold",
                message: format!("must be positive, got {}", config.rmsd_threshold),
            });
        }
        if config.n_cores == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "n_cores",
                message: "at least one core is required".to_string(),
            });
        }
        if config.displacement_magnitudes.iter().any(|&m| m == 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "displacement_magnitudes",
                message: "zero displacement cannot correct a mode".to_string(),
            });
        }

        Ok(config)
    }
}
