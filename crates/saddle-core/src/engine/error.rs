use crate::core::templates::TemplateError;
use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Calculation backend failure in '{name}': {message}")]
    Backend { name: String, message: String },

    #[error("Trial geometry generation failed on trial {trial}: {message}")]
    TrialGeneration { trial: usize, message: String },

    #[error("Transition state has no atoms")]
    EmptyStructure,

    #[error("Invalid refinement configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Template export failed: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },
}
