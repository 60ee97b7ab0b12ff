use axum::extract::State;
use axum::http::StatusCode;

use super::TourData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_tours(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TourData>>, ApiError> {
    state
        .tour_service
        .list_tours()
        .await
        .map_err(ApiError::from)
        .map(|tours| ApiSuccess::new(StatusCode::OK, tours.iter().map(TourData::from).collect()))
}
