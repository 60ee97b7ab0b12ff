use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ReviewData;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::Rating;
use crate::domain::review::models::ReviewText;
use crate::domain::tour::models::TourId;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// `POST /api/v1/reviews`; the tour comes from the body.
pub async fn create_review(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    create(state, principal, body, None).await
}

/// `POST /api/v1/tours/:tour_id/reviews`; the path names the tour.
pub async fn create_tour_review(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(tour_id): Path<String>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    create(state, principal, body, Some(tour_id)).await
}

async fn create(
    state: AppState,
    principal: AuthenticatedPrincipal,
    body: CreateReviewRequest,
    path_tour_id: Option<String>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    let command = body
        .try_into_command(path_tour_id)
        .map_err(ApiError::from)?;

    state
        .review_service
        .create_review(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref review| ApiSuccess::new(StatusCode::CREATED, review.into()))
}

/// HTTP request body for creating a review (raw JSON).
///
/// The author is always the caller; a `user` field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateReviewRequest {
    review: Option<String>,
    rating: Option<f64>,
    tour: Option<String>,
}

impl CreateReviewRequest {
    fn try_into_command(
        self,
        path_tour_id: Option<String>,
    ) -> Result<CreateReviewCommand, ReviewError> {
        let tour_id = path_tour_id
            .or(self.tour)
            .ok_or_else(|| ReviewError::MissingField("Review must belong to a tour.".to_string()))?;
        let review = self
            .review
            .ok_or_else(|| ReviewError::MissingField("Please provide a review".to_string()))?;
        let rating = self
            .rating
            .ok_or_else(|| ReviewError::MissingField("Please provide a rating".to_string()))?;

        Ok(CreateReviewCommand {
            tour_id: TourId::from_string(&tour_id)?,
            review: ReviewText::new(review)?,
            rating: Rating::new(rating)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tour: Option<&str>) -> CreateReviewRequest {
        CreateReviewRequest {
            review: Some("Wonderful".to_string()),
            rating: Some(4.0),
            tour: tour.map(str::to_string),
        }
    }

    #[test]
    fn test_path_tour_takes_precedence_over_body() {
        let path_tour = TourId::new();
        let body_tour = TourId::new();

        let command = request(Some(&body_tour.to_string()))
            .try_into_command(Some(path_tour.to_string()))
            .unwrap();
        assert_eq!(command.tour_id, path_tour);
    }

    #[test]
    fn test_tour_is_required() {
        let err = request(None).try_into_command(None).unwrap_err();
        assert_eq!(err.to_string(), "Review must belong to a tour.");
    }

    #[test]
    fn test_rating_is_required() {
        let mut body = request(Some(&TourId::new().to_string()));
        body.rating = None;

        let err = body.try_into_command(None).unwrap_err();
        assert_eq!(err.to_string(), "Please provide a rating");
    }
}
