use std::path::PathBuf;
use thiserror::Error;
use tono::engine::error::EngineError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Attaches the offending path to layout-format errors; other engine
    /// errors pass through unchanged.
    pub fn from_engine_at(path: &std::path::Path, error: EngineError) -> Self {
        match error {
            EngineError::Format(source) => Self::FileParsing {
                path: path.to_path_buf(),
                source: source.into(),
            },
            other => Self::Engine(other),
        }
    }
}
