use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::TourData;
use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::CreateTourCommand;
use crate::domain::tour::models::Difficulty;
use crate::domain::tour::models::TourName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_tour(
    State(state): State<AppState>,
    Json(body): Json<CreateTourRequest>,
) -> Result<ApiSuccess<TourData>, ApiError> {
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .tour_service
        .create_tour(command)
        .await
        .map_err(ApiError::from)
        .map(|ref tour| ApiSuccess::new(StatusCode::CREATED, tour.into()))
}

/// HTTP request body for creating a tour (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTourRequest {
    name: String,
    duration: i32,
    max_group_size: i32,
    difficulty: String,
    #[serde(default)]
    ratings_average: Option<f64>,
    price: f64,
    #[serde(default)]
    price_discount: Option<f64>,
    summary: String,
    #[serde(default)]
    description: Option<String>,
    image_cover: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    start_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    secret_tour: bool,
}

impl CreateTourRequest {
    fn try_into_command(self) -> Result<CreateTourCommand, TourError> {
        Ok(CreateTourCommand {
            name: TourName::new(self.name)?,
            duration: self.duration,
            max_group_size: self.max_group_size,
            difficulty: self.difficulty.parse::<Difficulty>()?,
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
