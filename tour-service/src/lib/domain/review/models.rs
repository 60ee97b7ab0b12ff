use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::review::errors::RatingError;
use crate::domain::review::errors::ReviewIdError;
use crate::domain::review::errors::ReviewTextError;
use crate::domain::tour::models::TourId;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Review aggregate entity, as read back with its author.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub review: ReviewText,
    pub rating: Rating,
    pub tour_id: TourId,
    pub author: ReviewAuthor,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Authors may change their own reviews; admins may change any.
    pub fn can_be_modified_by(&self, user_id: &UserId, role: Role) -> bool {
        role == Role::Admin || self.author.id == *user_id
    }
}

/// Public author details shown with a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAuthor {
    pub id: UserId,
    pub name: String,
    pub photo: Option<String>,
}

/// Review ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub id: ReviewId,
    pub review: ReviewText,
    pub rating: Rating,
    pub tour_id: TourId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewReview {
    pub fn new(author_id: UserId, command: CreateReviewCommand, now: DateTime<Utc>) -> Self {
        Self {
            id: ReviewId::new(),
            review: command.review,
            rating: command.rating,
            tour_id: command.tour_id,
            author_id,
            created_at: now,
        }
    }
}

/// Review unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(pub Uuid);

impl ReviewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse review ID from string representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ReviewIdError> {
        Uuid::parse_str(s)
            .map(ReviewId)
            .map_err(|_| ReviewIdError::InvalidFormat(s.to_string()))
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Star rating between 1 and 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, RatingError> {
        if value.is_nan() || value < Self::MIN {
            return Err(RatingError::TooLow(value));
        }
        if value > Self::MAX {
            return Err(RatingError::TooHigh(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Non-empty review body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn new(text: String) -> Result<Self, ReviewTextError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ReviewTextError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to review a tour as the calling user
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub tour_id: TourId,
    pub review: ReviewText,
    pub rating: Rating,
}

/// Partial update of a review's text or rating
#[derive(Debug, Clone, Default)]
pub struct UpdateReviewCommand {
    pub review: Option<ReviewText>,
    pub rating: Option<Rating>,
}

impl UpdateReviewCommand {
    pub fn is_empty(&self) -> bool {
        self.review.is_none() && self.rating.is_none()
    }
}
