use thiserror::Error;

/// Dockerfile analysis error types
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Input ended while a `\` continuation was still open
    #[error("unterminated line continuation at end of file")]
    UnterminatedContinuation,

    /// The Dockerfile contains no instructions
    #[error("no Dockerfile instructions found in {path}")]
    EmptyInput { path: String },

    /// FROM has no base image token
    #[error("line {line}: FROM instruction missing base image")]
    MissingBaseImage { line: usize },

    /// A non-ARG instruction appeared before the first FROM
    #[error("line {line}: Dockerfile must start with FROM (found {keyword})")]
    InstructionBeforeFrom { line: usize, keyword: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AnalyzeError {
    /// Source line the error points at, if it is tied to one instruction.
    pub fn line(&self) -> Option<usize> {
        match self {
            AnalyzeError::MissingBaseImage { line }
            | AnalyzeError::InstructionBeforeFrom { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AnalyzeError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzeError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for AnalyzeError {
    fn from(err: serde_yaml::Error) -> Self {
        AnalyzeError::SerializationError(err.to_string())
    }
}

/// Result type alias for dockerlayers operations
pub type Result<T> = std::result::Result<T, AnalyzeError>;
