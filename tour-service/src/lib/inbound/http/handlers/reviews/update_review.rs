use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::parse_review_id;
use super::ReviewData;
use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::Rating;
use crate::domain::review::models::ReviewText;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_review(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(review_id): Path<String>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<ApiSuccess<ReviewData>, ApiError> {
    let review_id = parse_review_id(&review_id)?;
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .review_service
        .update_review(&principal, &review_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref review| ApiSuccess::new(StatusCode::OK, review.into()))
}

/// HTTP request body for a partial review update (raw JSON).
///
/// Tour and author cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateReviewRequest {
    review: Option<String>,
    rating: Option<f64>,
}

impl UpdateReviewRequest {
    fn try_into_command(self) -> Result<UpdateReviewCommand, ReviewError> {
        Ok(UpdateReviewCommand {
            review: self.review.map(ReviewText::new).transpose()?,
            rating: self.rating.map(Rating::new).transpose()?,
        })
    }
}
