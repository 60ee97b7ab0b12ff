pub mod create_tour;
pub mod delete_tour;
pub mod get_tour;
pub mod list_tours;
pub mod update_tour;

pub use create_tour::create_tour;
pub use delete_tour::delete_tour;
pub use get_tour::get_tour;
pub use list_tours::list_tours;
pub use update_tour::update_tour;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::tour::models::Difficulty;
use crate::domain::tour::models::Tour;

/// Public projection of a tour, including the derived duration in weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub duration: i32,
    pub duration_weeks: f64,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub price: f64,
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub start_dates: Vec<DateTime<Utc>>,
    pub secret_tour: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Tour> for TourData {
    fn from(tour: &Tour) -> Self {
        Self {
            id: tour.id.to_string(),
            name: tour.name.as_str().to_string(),
            slug: tour.slug.clone(),
            duration: tour.duration,
            duration_weeks: tour.duration_weeks(),
            max_group_size: tour.max_group_size,
            difficulty: tour.difficulty,
            ratings_average: tour.ratings_average,
            ratings_quantity: tour.ratings_quantity,
            price: tour.price,
            price_discount: tour.price_discount,
            summary: tour.summary.clone(),
            description: tour.description.clone(),
            image_cover: tour.image_cover.clone(),
            images: tour.images.clone(),
            start_dates: tour.start_dates.clone(),
            secret_tour: tour.secret_tour,
            created_at: tour.created_at,
        }
    }
}
