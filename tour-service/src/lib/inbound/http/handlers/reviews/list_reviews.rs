use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ReviewData;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::Review;
use crate::domain::tour::models::TourId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ReviewData>>, ApiError> {
    state
        .review_service
        .list_reviews(None)
        .await
        .map_err(ApiError::from)
        .map(respond)
}

pub async fn list_tour_reviews(
    State(state): State<AppState>,
    Path(tour_id): Path<String>,
) -> Result<ApiSuccess<Vec<ReviewData>>, ApiError> {
    let tour_id =
        TourId::from_string(&tour_id).map_err(|e| ApiError::from(ReviewError::from(e)))?;

    state
        .review_service
        .list_reviews(Some(tour_id))
        .await
        .map_err(ApiError::from)
        .map(respond)
}

fn respond(reviews: Vec<Review>) -> ApiSuccess<Vec<ReviewData>> {
    ApiSuccess::new(
        StatusCode::OK,
        reviews.iter().map(ReviewData::from).collect(),
    )
}
