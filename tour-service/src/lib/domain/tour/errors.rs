use thiserror::Error;

/// Error for TourId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TourIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TourName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TourNameError {
    #[error("A tour name must have more or equal then {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("A tour name must have less or equal then {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Difficulty parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("Difficulty is either: easy, medium, difficult (got '{0}')")]
    Unknown(String),
}

/// Top-level error for all tour-related operations
#[derive(Debug, Clone, Error)]
pub enum TourError {
    #[error("Invalid tour ID: {0}")]
    InvalidTourId(#[from] TourIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] TourNameError),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(#[from] DifficultyError),

    #[error("{0}")]
    InvalidField(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Tour name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TourError {
    fn from(err: anyhow::Error) -> Self {
        TourError::Unknown(err.to_string())
    }
}
