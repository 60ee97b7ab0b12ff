use async_trait::async_trait;

use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::tour::models::TourId;
use crate::domain::user::principal::AuthenticatedPrincipal;

/// Port for review domain service operations.
#[async_trait]
pub trait ReviewServicePort: Send + Sync + 'static {
    /// List reviews, optionally only those of one tour.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_reviews(&self, tour_id: Option<TourId>) -> Result<Vec<Review>, ReviewError>;

    /// Retrieve a review by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_review(&self, id: &ReviewId) -> Result<Review, ReviewError>;

    /// Review a tour as the calling user.
    ///
    /// # Errors
    /// * `TourNotFound` - Tour does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_review(
        &self,
        principal: &AuthenticatedPrincipal,
        command: CreateReviewCommand,
    ) -> Result<Review, ReviewError>;

    /// Change the text or rating of a review.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `Forbidden` - Caller is neither the author nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn update_review(
        &self,
        principal: &AuthenticatedPrincipal,
        id: &ReviewId,
        command: UpdateReviewCommand,
    ) -> Result<Review, ReviewError>;

    /// Delete a review.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `Forbidden` - Caller is neither the author nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_review(
        &self,
        principal: &AuthenticatedPrincipal,
        id: &ReviewId,
    ) -> Result<(), ReviewError>;
}

/// Persistence operations for review aggregate.
///
/// Reviews whose author is no longer active are not returned.
#[async_trait]
pub trait ReviewRepository: Send + Sync + 'static {
    /// Persist new review and read it back with its author.
    ///
    /// # Errors
    /// * `TourNotFound` - Tour does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, review: NewReview) -> Result<Review, ReviewError>;

    /// Retrieve review by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError>;

    /// Retrieve reviews oldest first, optionally for one tour.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, tour_id: Option<TourId>) -> Result<Vec<Review>, ReviewError>;

    /// Write only the provided fields of a review.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        id: &ReviewId,
        changes: &UpdateReviewCommand,
    ) -> Result<Review, ReviewError>;

    /// Remove review from storage.
    ///
    /// # Errors
    /// * `NotFound` - Review does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewError>;
}
