use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Rating;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewAuthor;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::ReviewText;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::review::ports::ReviewRepository;
use crate::domain::tour::models::TourId;
use crate::domain::user::models::UserId;

const REVIEW_COLUMNS: &str = "r.id, r.review, r.rating, r.tour_id, r.created_at, \
     u.id AS author_id, u.name AS author_name, u.photo AS author_photo";

const AUTHOR_JOIN: &str = "JOIN users u ON u.id = r.user_id AND u.active";

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &PgRow) -> Result<Review, ReviewError> {
        Ok(Review {
            id: ReviewId(row.try_get("id").map_err(db_error)?),
            review: ReviewText::new(row.try_get("review").map_err(db_error)?)?,
            rating: Rating::new(row.try_get("rating").map_err(db_error)?)?,
            tour_id: TourId(row.try_get("tour_id").map_err(db_error)?),
            author: ReviewAuthor {
                id: UserId(row.try_get("author_id").map_err(db_error)?),
                name: row.try_get("author_name").map_err(db_error)?,
                photo: row.try_get("author_photo").map_err(db_error)?,
            },
            created_at: row.try_get("created_at").map_err(db_error)?,
        })
    }

    fn map_write_error(e: sqlx::Error, tour_id: &TourId) -> ReviewError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation()
                && db_err.constraint() == Some("reviews_tour_id_fkey")
            {
                return ReviewError::TourNotFound(format!("No tour found with ID {}", tour_id));
            }
        }
        db_error(e)
    }
}

fn db_error(e: sqlx::Error) -> ReviewError {
    ReviewError::DatabaseError(e.to_string())
}

fn not_found(id: &ReviewId) -> ReviewError {
    ReviewError::NotFound(format!("No review found with ID {}", id))
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review, ReviewError> {
        let row = sqlx::query(&format!(
            r#"
            WITH r AS (
                INSERT INTO reviews (id, review, rating, tour_id, user_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {} FROM r {}
            "#,
            REVIEW_COLUMNS, AUTHOR_JOIN
        ))
        .bind(review.id.0)
        .bind(review.review.as_str())
        .bind(review.rating.value())
        .bind(review.tour_id.0)
        .bind(review.author_id.0)
        .bind(review.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &review.tour_id))?
        .ok_or_else(|| not_found(&review.id))?;

        Self::row_to_review(&row)
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reviews r {} WHERE r.id = $1",
            REVIEW_COLUMNS, AUTHOR_JOIN
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn list(&self, tour_id: Option<TourId>) -> Result<Vec<Review>, ReviewError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM reviews r {} \
             WHERE $1::uuid IS NULL OR r.tour_id = $1 \
             ORDER BY r.created_at",
            REVIEW_COLUMNS, AUTHOR_JOIN
        ))
        .bind(tour_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(Self::row_to_review).collect()
    }

    async fn update(
        &self,
        id: &ReviewId,
        changes: &UpdateReviewCommand,
    ) -> Result<Review, ReviewError> {
        let row = sqlx::query(&format!(
            r#"
            WITH r AS (
                UPDATE reviews
                SET review = COALESCE($2, review), rating = COALESCE($3, rating)
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM r {}
            "#,
            REVIEW_COLUMNS, AUTHOR_JOIN
        ))
        .bind(id.0)
        .bind(changes.review.as_ref().map(ReviewText::as_str))
        .bind(changes.rating.map(|rating| rating.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found(id))?;

        Self::row_to_review(&row)
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), ReviewError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
