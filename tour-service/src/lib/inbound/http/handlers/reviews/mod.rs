pub mod create_review;
pub mod delete_review;
pub mod get_review;
pub mod list_reviews;
pub mod update_review;

pub use create_review::create_review;
pub use create_review::create_tour_review;
pub use delete_review::delete_review;
pub use get_review::get_review;
pub use list_reviews::list_reviews;
pub use list_reviews::list_tour_reviews;
pub use update_review::update_review;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::inbound::http::handlers::ApiError;

/// Public projection of a review with its author's name and photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewData {
    pub id: String,
    pub review: String,
    pub rating: f64,
    pub tour: String,
    pub user: ReviewAuthorData,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewAuthorData {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
}

impl From<&Review> for ReviewData {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            review: review.review.as_str().to_string(),
            rating: review.rating.value(),
            tour: review.tour_id.to_string(),
            user: ReviewAuthorData {
                id: review.author.id.to_string(),
                name: review.author.name.clone(),
                photo: review.author.photo.clone(),
            },
            created_at: review.created_at,
        }
    }
}

fn parse_review_id(review_id: &str) -> Result<ReviewId, ApiError> {
    ReviewId::from_string(review_id).map_err(|e| ApiError::from(ReviewError::from(e)))
}
