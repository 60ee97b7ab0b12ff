use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::tour::errors::DifficultyError;
use crate::domain::tour::errors::TourError;
use crate::domain::tour::errors::TourIdError;
use crate::domain::tour::errors::TourNameError;

/// Tour aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub id: TourId,
    pub name: TourName,
    pub slug: String,
    pub duration: i32,
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

impl Tour {
    pub const DEFAULT_RATING: f64 = 4.5;

    /// Build a new tour from a create command.
    ///
    /// # Errors
    /// * `InvalidField` - A numeric field is out of range
    pub fn create(command: CreateTourCommand, now: DateTime<Utc>) -> Result<Self, TourError> {
        let tour = Self {
            id: TourId::new(),
            slug: slugify(command.name.as_str()),
            name: command.name,
            duration: command.duration,
            max_group_size: command.max_group_size,
            difficulty: command.difficulty,
            ratings_average: round_rating(command.ratings_average.unwrap_or(Self::DEFAULT_RATING)),
            ratings_quantity: 0,
            price: command.price,
            price_discount: command.price_discount,
            summary: command.summary.trim().to_string(),
            description: command.description.map(|d| d.trim().to_string()),
            image_cover: command.image_cover,
            images: command.images,
            start_dates: command.start_dates,
            secret_tour: command.secret_tour,
            created_at: now,
        };
        tour.validate()?;
        Ok(tour)
    }

    /// Apply a partial update, re-deriving the slug and re-validating.
    ///
    /// # Errors
    /// * `InvalidField` - The resulting tour is out of range
    pub fn apply(&mut self, command: UpdateTourCommand) -> Result<(), TourError> {
        if let Some(name) = command.name {
            self.slug = slugify(name.as_str());
            self.name = name;
        }
        if let Some(duration) = command.duration {
            self.duration = duration;
        }
        if let Some(max_group_size) = command.max_group_size {
            self.max_group_size = max_group_size;
        }
        if let Some(difficulty) = command.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(ratings_average) = command.ratings_average {
            self.ratings_average = round_rating(ratings_average);
        }
        if let Some(price) = command.price {
            self.price = price;
        }
        if let Some(price_discount) = command.price_discount {
            self.price_discount = Some(price_discount);
        }
        if let Some(summary) = command.summary {
            self.summary = summary.trim().to_string();
        }
        if let Some(description) = command.description {
            self.description = Some(description.trim().to_string());
        }
        if let Some(image_cover) = command.image_cover {
            self.image_cover = image_cover;
        }
        if let Some(images) = command.images {
            self.images = images;
        }
        if let Some(start_dates) = command.start_dates {
            self.start_dates = start_dates;
        }
        if let Some(secret_tour) = command.secret_tour {
            self.secret_tour = secret_tour;
        }
        self.validate()
    }

    pub fn duration_weeks(&self) -> f64 {
        f64::from(self.duration) / 7.0
    }

    fn validate(&self) -> Result<(), TourError> {
        if self.duration <= 0 {
            return Err(TourError::InvalidField(
                "A tour must have a positive duration".to_string(),
            ));
        }
        if self.max_group_size <= 0 {
            return Err(TourError::InvalidField(
                "A tour must have a positive group size".to_string(),
            ));
        }
        if !(1.0..=5.0).contains(&self.ratings_average) {
            return Err(TourError::InvalidField(
                "Rating must be between 1.0 and 5.0".to_string(),
            ));
        }
        if self.price <= 0.0 {
            return Err(TourError::InvalidField(
                "A tour must have a positive price".to_string(),
            ));
        }
        if let Some(discount) = self.price_discount {
            if discount >= self.price {
                return Err(TourError::InvalidField(format!(
                    "Discount price ({}) should be below regular price",
                    discount
                )));
            }
        }
        if self.summary.is_empty() {
            return Err(TourError::InvalidField(
                "A tour must have a summary".to_string(),
            ));
        }
        if self.image_cover.trim().is_empty() {
            return Err(TourError::InvalidField(
                "A tour must have a cover image".to_string(),
            ));
        }
        Ok(())
    }
}

fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Lowercase, ASCII-alphanumeric words joined by hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Tour unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TourId(pub Uuid);

impl TourId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a tour ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TourIdError> {
        Uuid::parse_str(s)
            .map(TourId)
            .map_err(|e| TourIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TourId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tour name value type
///
/// Trimmed, between 10 and 40 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourName(String);

impl TourName {
    const MIN_LENGTH: usize = 10;
    const MAX_LENGTH: usize = 40;

    pub fn new(name: String) -> Result<Self, TourNameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TourNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TourNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TourName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "difficult",
        }
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "difficult" => Ok(Difficulty::Difficult),
            other => Err(DifficultyError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to create a new tour with domain types
#[derive(Debug, Clone)]
pub struct CreateTourCommand {
    pub name: TourName,
    pub duration: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub ratings_average: Option<f64>,
    pub price: f64,
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub start_dates: Vec<DateTime<Utc>>,
    pub secret_tour: bool,
}

/// Command to update an existing tour.
///
/// Only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateTourCommand {
    pub name: Option<TourName>,
    pub duration: Option<i32>,
    pub max_group_size: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub ratings_average: Option<f64>,
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_cover: Option<String>,
    pub images: Option<Vec<String>>,
    pub start_dates: Option<Vec<DateTime<Utc>>>,
    pub secret_tour: Option<bool>,
}
