use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::TourId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tour_id = TourId::from_string(&tour_id).map_err(|e| ApiError::from(TourError::from(e)))?;

    state
        .tour_service
        .delete_tour(&tour_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
