use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::TourData;
use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::Difficulty;
use crate::domain::tour::models::TourId;
use crate::domain::tour::models::TourName;
use crate::domain::tour::models::UpdateTourCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_tour(
    State(state): State<AppState>,
    Path(tour_id): Path<String>,
    Json(body): Json<UpdateTourRequest>,
) -> Result<ApiSuccess<TourData>, ApiError> {
    let tour_id = TourId::from_string(&tour_id).map_err(|e| ApiError::from(TourError::from(e)))?;
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .tour_service
        .update_tour(&tour_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref tour| ApiSuccess::new(StatusCode::OK, tour.into()))
}

/// HTTP request body for a partial tour update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateTourRequest {
    name: Option<String>,
    duration: Option<i32>,
    max_group_size: Option<i32>,
    difficulty: Option<String>,
    ratings_average: Option<f64>,
    price: Option<f64>,
    price_discount: Option<f64>,
    summary: Option<String>,
    description: Option<String>,
    image_cover: Option<String>,
    images: Option<Vec<String>>,
    start_dates: Option<Vec<DateTime<Utc>>>,
    secret_tour: Option<bool>,
}

impl UpdateTourRequest {
    fn try_into_command(self) -> Result<UpdateTourCommand, TourError> {
        Ok(UpdateTourCommand {
            name: self.name.map(TourName::new).transpose()?,
            duration: self.duration,
            max_group_size: self.max_group_size,
            difficulty: self
                .difficulty
                .as_deref()
                .map(str::parse::<Difficulty>)
                .transpose()?,
            ratings_average: self.ratings_average,
            price: self.price,
            price_discount: self.price_discount,
            summary: self.summary,
            description: self.description,
            image_cover: self.image_cover,
            images: self.images,
            start_dates: self.start_dates,
            secret_tour: self.secret_tour,
        })
    }
}
