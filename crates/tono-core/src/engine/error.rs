use super::config::ConfigError;
use crate::core::io::knot_text::KnotFileError;
use crate::core::models::parameters::ParameterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Index out of range: strand {strand}{}", atom.map(|a| format!(", atom {a}")).unwrap_or_default())]
    OutOfRange { strand: usize, atom: Option<usize> },

    #[error("A strand needs at least one atom")]
    EmptyStrand,

    #[error("Malformed knot data: {0}")]
    Format(KnotFileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid knot parameters: {0}")]
    Parameters(#[from] ParameterError),
}

impl From<KnotFileError> for EngineError {
    fn from(err: KnotFileError) -> Self {
        match err {
            KnotFileError::Io(source) => EngineError::Io(source),
            other => EngineError::Format(other),
        }
    }
}
