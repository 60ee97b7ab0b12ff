use thiserror::Error;

use crate::domain::tour::errors::TourIdError;

/// Error for ReviewId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Rating validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RatingError {
    #[error("The review must be greater than or equal to 1")]
    TooLow(f64),

    #[error("The review must be less than or equal to 5")]
    TooHigh(f64),
}

/// Error for review text validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewTextError {
    #[error("Please provide a review")]
    Empty,
}

/// Top-level error for all review-related operations
#[derive(Debug, Clone, Error)]
pub enum ReviewError {
    #[error("Invalid review ID: {0}")]
    InvalidReviewId(#[from] ReviewIdError),

    #[error("Invalid tour ID: {0}")]
    InvalidTourId(#[from] TourIdError),

    #[error("{0}")]
    InvalidRating(#[from] RatingError),

    #[error("{0}")]
    InvalidReview(#[from] ReviewTextError),

    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TourNotFound(String),

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        ReviewError::Unknown(err.to_string())
    }
}
