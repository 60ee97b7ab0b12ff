use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::Difficulty;
use crate::domain::tour::models::Tour;
use crate::domain::tour::models::TourId;
use crate::domain::tour::models::TourName;
use crate::domain::tour::ports::TourRepository;

const TOUR_COLUMNS: &str = "id, name, slug, duration, max_group_size, difficulty, ratings_average, \
     ratings_quantity, price, price_discount, summary, description, image_cover, images, \
     start_dates, secret_tour, created_at";

pub struct PostgresTourRepository {
    pool: PgPool,
}

impl PostgresTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_tour(row: &PgRow) -> Result<Tour, TourError> {
        let difficulty: String = row.try_get("difficulty").map_err(db_error)?;

        Ok(Tour {
            id: TourId(row.try_get("id").map_err(db_error)?),
            name: TourName::new(row.try_get("name").map_err(db_error)?)?,
            slug: row.try_get("slug").map_err(db_error)?,
            duration: row.try_get("duration").map_err(db_error)?,
            max_group_size: row.try_get("max_group_size").map_err(db_error)?,
            difficulty: difficulty.parse::<Difficulty>()?,
            ratings_average: row.try_get("ratings_average").map_err(db_error)?,
            ratings_quantity: row.try_get("ratings_quantity").map_err(db_error)?,
            price: row.try_get("price").map_err(db_error)?,
            price_discount: row.try_get("price_discount").map_err(db_error)?,
            summary: row.try_get("summary").map_err(db_error)?,
            description: row.try_get("description").map_err(db_error)?,
            image_cover: row.try_get("image_cover").map_err(db_error)?,
            images: row.try_get("images").map_err(db_error)?,
            start_dates: row.try_get("start_dates").map_err(db_error)?,
            secret_tour: row.try_get("secret_tour").map_err(db_error)?,
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }

    fn map_write_error(e: sqlx::Error, tour: &Tour) -> TourError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("tours_name_key") {
                return TourError::NameAlreadyExists(tour.name.as_str().to_string());
            }
        }
        db_error(e)
    }
}

fn db_error(e: sqlx::Error) -> TourError {
    TourError::DatabaseError(e.to_string())
}

#[async_trait]
impl TourRepository for PostgresTourRepository {
    async fn create(&self, tour: Tour) -> Result<Tour, TourError> {
        sqlx::query(
            r#"
            INSERT INTO tours (id, name, slug, duration, max_group_size, difficulty, ratings_average,
                               ratings_quantity, price, price_discount, summary, description,
                               image_cover, images, start_dates, secret_tour, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(tour.id.0)
        .bind(tour.name.as_str())
        .bind(&tour.slug)
        .bind(tour.duration)
        .bind(tour.max_group_size)
        .bind(tour.difficulty.as_str())
        .bind(tour.ratings_average)
        .bind(tour.ratings_quantity)
        .bind(tour.price)
        .bind(tour.price_discount)
        .bind(&tour.summary)
        .bind(tour.description.as_deref())
        .bind(&tour.image_cover)
        .bind(&tour.images)
        .bind(&tour.start_dates)
        .bind(tour.secret_tour)
        .bind(tour.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &tour))?;

        Ok(tour)
    }

    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError> {
        let row = sqlx::query(&format!("SELECT {} FROM tours WHERE id = $1", TOUR_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(Self::row_to_tour).transpose()
    }

    async fn list_public(&self) -> Result<Vec<Tour>, TourError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tours WHERE NOT secret_tour ORDER BY created_at",
            TOUR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_tour).collect()
    }

    async fn update(&self, tour: Tour) -> Result<Tour, TourError> {
        let result = sqlx::query(
            r#"
            UPDATE tours
            SET name = $2, slug = $3, duration = $4, max_group_size = $5, difficulty = $6,
                ratings_average = $7, ratings_quantity = $8, price = $9, price_discount = $10,
                summary = $11, description = $12, image_cover = $13, images = $14,
                start_dates = $15, secret_tour = $16
            WHERE id = $1
            "#,
        )
        .bind(tour.id.0)
        .bind(tour.name.as_str())
        .bind(&tour.slug)
        .bind(tour.duration)
        .bind(tour.max_group_size)
        .bind(tour.difficulty.as_str())
        .bind(tour.ratings_average)
        .bind(tour.ratings_quantity)
        .bind(tour.price)
        .bind(tour.price_discount)
        .bind(&tour.summary)
        .bind(tour.description.as_deref())
        .bind(&tour.image_cover)
        .bind(&tour.images)
        .bind(&tour.start_dates)
        .bind(tour.secret_tour)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &tour))?;

        if result.rows_affected() == 0 {
            return Err(TourError::NotFound(format!("No tour found with ID {}", tour.id)));
        }

        Ok(tour)
    }

    async fn delete(&self, id: &TourId) -> Result<(), TourError> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(TourError::NotFound(format!("No tour found with ID {}", id)));
        }

        Ok(())
    }
}
