use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("missing input: {0}")] Validation(String),
    #[error("transport error: {0}")] Transport(String),
    #[error("schema mismatch: {0}")] SchemaMismatch(String),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "validation",
            GenerationError::Transport(_) => "transport",
            GenerationError::SchemaMismatch(_) => "schema",
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.to_string())
    }
}
