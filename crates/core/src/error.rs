use crate::validation::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid patient record: {}", summarise(.0))]
    Validation(Vec<FieldViolation>),
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("patient already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read patient store: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient store: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patient store: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient store: {0}")]
    Deserialization(serde_json::Error),
}

impl PatientError {
    /// Returns the field violations carried by a validation failure.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            PatientError::Validation(violations) => violations,
            _ => &[],
        }
    }
}

fn summarise(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
