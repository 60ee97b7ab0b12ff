use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::review::errors::ReviewError;
use crate::domain::review::models::CreateReviewCommand;
use crate::domain::review::models::NewReview;
use crate::domain::review::models::Review;
use crate::domain::review::models::ReviewId;
use crate::domain::review::models::UpdateReviewCommand;
use crate::domain::review::ports::ReviewRepository;
use crate::domain::review::ports::ReviewServicePort;
use crate::domain::tour::models::TourId;
use crate::domain::user::principal::AuthenticatedPrincipal;

/// Domain service implementation for review operations.
pub struct ReviewService<RR>
where
    RR: ReviewRepository,
{
    repository: Arc<RR>,
}

impl<RR> ReviewService<RR>
where
    RR: ReviewRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }

    async fn find(&self, id: &ReviewId) -> Result<Review, ReviewError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(format!("No review found with ID {}", id)))
    }

    async fn find_modifiable(
        &self,
        principal: &AuthenticatedPrincipal,
        id: &ReviewId,
    ) -> Result<Review, ReviewError> {
        let review = self.find(id).await?;

        if !review.can_be_modified_by(principal.id(), principal.user().role) {
            tracing::warn!(
                review_id = %id,
                user_id = %principal.id(),
                "Review change rejected: not the author"
            );
            return Err(ReviewError::Forbidden);
        }

        Ok(review)
    }
}

#[async_trait]
impl<RR> ReviewServicePort for ReviewService<RR>
where
    RR: ReviewRepository,
{
    async fn list_reviews(&self, tour_id: Option<TourId>) -> Result<Vec<Review>, ReviewError> {
        self.repository.list(tour_id).await
    }

    async fn get_review(&self, id: &ReviewId) -> Result<Review, ReviewError> {
        self.find(id).await
    }

    async fn create_review(
        &self,
        principal: &AuthenticatedPrincipal,
        command: CreateReviewCommand,
    ) -> Result<Review, ReviewError> {
        let review = NewReview::new(*principal.id(), command, Utc::now());
        let created = self.repository.create(review).await?;
        tracing::info!(
            review_id = %created.id,
            tour_id = %created.tour_id,
            user_id = %created.author.id,
            "Review created"
        );
        Ok(created)
    }

    async fn update_review(
        &self,
        principal: &AuthenticatedPrincipal,
        id: &ReviewId,
        command: UpdateReviewCommand,
    ) -> Result<Review, ReviewError> {
        let review = self.find_modifiable(principal, id).await?;
        if command.is_empty() {
            return Ok(review);
        }

        self.repository.update(id, &command).await
    }

    async fn delete_review(
        &self,
        principal: &AuthenticatedPrincipal,
        id: &ReviewId,
    ) -> Result<(), ReviewError> {
        self.find_modifiable(principal, id).await?;
        self.repository.delete(id).await?;
        tracing::info!(review_id = %id, user_id = %principal.id(), "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::review::models::Rating;
    use crate::domain::review::models::ReviewAuthor;
    use crate::domain::review::models::ReviewText;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestReviewRepository {}

        #[async_trait]
        impl ReviewRepository for TestReviewRepository {
            async fn create(&self, review: NewReview) -> Result<Review, ReviewError>;
            async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewError>;
            async fn list(&self, tour_id: Option<TourId>) -> Result<Vec<Review>, ReviewError>;
            async fn update(&self, id: &ReviewId, changes: &UpdateReviewCommand) -> Result<Review, ReviewError>;
            async fn delete(&self, id: &ReviewId) -> Result<(), ReviewError>;
        }
    }

    fn principal(role: Role) -> AuthenticatedPrincipal {
        let mut user = User::register(
            UserName::new("Jonas".to_string()).unwrap(),
            EmailAddress::new("jonas@example.com".to_string()).unwrap(),
            None,
            "$argon2id$hash".to_string(),
            Utc::now(),
        );
        user.role = role;
        AuthenticatedPrincipal::new(user, Utc::now().timestamp())
    }

    fn review_by(author: UserId) -> Review {
        Review {
            id: ReviewId::new(),
            review: ReviewText::new("Loved every minute".to_string()).unwrap(),
            rating: Rating::new(4.0).unwrap(),
            tour_id: TourId::new(),
            author: ReviewAuthor {
                id: author,
                name: "Jonas".to_string(),
                photo: None,
            },
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_review_is_attributed_to_caller() {
        let mut repository = MockTestReviewRepository::new();
        let principal = principal(Role::User);
        let author_id = *principal.id();
        let tour_id = TourId::new();

        repository
            .expect_create()
            .withf(move |review| {
                review.author_id == author_id
                    && review.tour_id == tour_id
                    && review.rating.value() == 5.0
            })
            .times(1)
            .returning(|review| {
                Ok(Review {
                    id: review.id,
                    review: review.review,
                    rating: review.rating,
                    tour_id: review.tour_id,
                    author: ReviewAuthor {
                        id: review.author_id,
                        name: "Jonas".to_string(),
                        photo: None,
                    },
                    created_at: review.created_at,
                })
            });

        let service = ReviewService::new(Arc::new(repository));

        let review = service
            .create_review(
                &principal,
                CreateReviewCommand {
                    tour_id,
                    review: ReviewText::new("Breathtaking".to_string()).unwrap(),
                    rating: Rating::new(5.0).unwrap(),
                },
            )
            .await
            .unwrap();

        assert_eq!(review.author.id, author_id);
        assert_eq!(review.review.as_str(), "Breathtaking");
    }

    #[tokio::test]
    async fn test_create_review_unknown_tour() {
        let mut repository = MockTestReviewRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|review| Err(ReviewError::TourNotFound(review.tour_id.to_string())));

        let service = ReviewService::new(Arc::new(repository));

        let result = service
            .create_review(
                &principal(Role::User),
                CreateReviewCommand {
                    tour_id: TourId::new(),
                    review: ReviewText::new("Breathtaking".to_string()).unwrap(),
                    rating: Rating::new(5.0).unwrap(),
                },
            )
            .await;
        assert!(matches!(result, Err(ReviewError::TourNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_reviews_for_tour() {
        let mut repository = MockTestReviewRepository::new();
        let tour_id = TourId::new();

        repository
            .expect_list()
            .withf(move |filter| *filter == Some(tour_id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ReviewService::new(Arc::new(repository));

        assert!(service.list_reviews(Some(tour_id)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_own_review() {
        let mut repository = MockTestReviewRepository::new();
        let principal = principal(Role::User);
        let review = review_by(*principal.id());
        let review_id = review.id;

        let stored = review.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_update()
            .withf(move |id, changes| {
                *id == review_id
                    && changes.review.is_none()
                    && changes.rating.map(|r| r.value()) == Some(3.0)
            })
            .times(1)
            .returning(move |_, changes| {
                let mut review = review.clone();
                review.rating = changes.rating.unwrap();
                Ok(review)
            });

        let service = ReviewService::new(Arc::new(repository));

        let updated = service
            .update_review(
                &principal,
                &review_id,
                UpdateReviewCommand {
                    rating: Some(Rating::new(3.0).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rating.value(), 3.0);
    }

    #[tokio::test]
    async fn test_update_someone_elses_review_is_forbidden() {
        let mut repository = MockTestReviewRepository::new();
        let review = review_by(UserId::new());
        let review_id = review.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(review.clone())));
        repository.expect_update().times(0);

        let service = ReviewService::new(Arc::new(repository));

        let result = service
            .update_review(
                &principal(Role::User),
                &review_id,
                UpdateReviewCommand {
                    rating: Some(Rating::new(1.0).unwrap()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ReviewError::Forbidden)));
    }

    #[tokio::test]
    async fn test_admin_deletes_any_review() {
        let mut repository = MockTestReviewRepository::new();
        let review = review_by(UserId::new());
        let review_id = review.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(review.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == review_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = ReviewService::new(Arc::new(repository));

        assert!(service
            .delete_review(&principal(Role::Admin), &review_id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_review() {
        let mut repository = MockTestReviewRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ReviewService::new(Arc::new(repository));

        let result = service
            .delete_review(&principal(Role::User), &ReviewId::new())
            .await;
        assert!(matches!(result, Err(ReviewError::NotFound(_))));
    }
}
