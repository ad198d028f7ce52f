pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Constraint error: {0}")]
    Constraint(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn too_many_answers(given: usize, max: u32) -> Self {
        Error::Validation(format!(
            "Too many answers \"{}\" given for maximum allowed of: \"{}\"",
            given, max
        ))
    }

    pub fn missing_configuration(kind: impl std::fmt::Display) -> Self {
        Error::InvalidState(format!("Question has no {} scoring configuration", kind))
    }

    pub fn wrong_answer_type(kind: impl std::fmt::Display) -> Self {
        Error::UnsupportedType(format!("Answer does not belong to {} scoring", kind))
    }
}
