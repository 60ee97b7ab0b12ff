use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::CreateTourCommand;
use crate::domain::tour::models::Tour;
use crate::domain::tour::models::TourId;
use crate::domain::tour::models::UpdateTourCommand;
use crate::domain::tour::ports::TourRepository;
use crate::domain::tour::ports::TourServicePort;

/// Domain service implementation for tour operations.
pub struct TourService<TR>
where
    TR: TourRepository,
{
    repository: Arc<TR>,
}

impl<TR> TourService<TR>
where
    TR: TourRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    async fn find(&self, id: &TourId) -> Result<Tour, TourError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TourError::NotFound(format!("No tour found with ID {}", id)))
    }
}

#[async_trait]
impl<TR> TourServicePort for TourService<TR>
where
    TR: TourRepository,
{
    async fn list_tours(&self) -> Result<Vec<Tour>, TourError> {
        self.repository.list_public().await
    }

    async fn get_tour(&self, id: &TourId) -> Result<Tour, TourError> {
        let tour = self.find(id).await?;
        if tour.secret_tour {
            return Err(TourError::NotFound(format!("No tour found with ID {}", id)));
        }
        Ok(tour)
    }

    async fn create_tour(&self, command: CreateTourCommand) -> Result<Tour, TourError> {
        let tour = Tour::create(command, Utc::now())?;
        let created_tour = self.repository.create(tour).await?;
        tracing::info!(tour_id = %created_tour.id, slug = %created_tour.slug, "Tour created");
        Ok(created_tour)
    }

    async fn update_tour(
        &self,
        id: &TourId,
        command: UpdateTourCommand,
    ) -> Result<Tour, TourError> {
        let mut tour = self.find(id).await?;
        tour.apply(command)?;
        self.repository.update(tour).await
    }

    async fn delete_tour(&self, id: &TourId) -> Result<(), TourError> {
        self.repository.delete(id).await?;
        tracing::info!(tour_id = %id, "Tour deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::tour::models::Difficulty;
    use crate::domain::tour::models::TourName;

    mock! {
        pub TestTourRepository {}

        #[async_trait]
        impl TourRepository for TestTourRepository {
            async fn create(&self, tour: Tour) -> Result<Tour, TourError>;
            async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError>;
            async fn list_public(&self) -> Result<Vec<Tour>, TourError>;
            async fn update(&self, tour: Tour) -> Result<Tour, TourError>;
            async fn delete(&self, id: &TourId) -> Result<(), TourError>;
        }
    }

    fn command(name: &str) -> CreateTourCommand {
        CreateTourCommand {
            name: TourName::new(name.to_string()).unwrap(),
            duration: 7,
            max_group_size: 15,
            difficulty: Difficulty::Medium,
            ratings_average: None,
            price: 497.0,
            price_discount: Some(100.0),
            summary: "Exploring the jaw-dropping US east coast".to_string(),
            description: None,
            image_cover: "tour-2-cover.jpg".to_string(),
            images: vec!["tour-2-1.jpg".to_string()],
            start_dates: vec![],
            secret_tour: false,
        }
    }

    #[tokio::test]
    async fn test_create_tour_success() {
        let mut repository = MockTestTourRepository::new();

        repository
            .expect_create()
            .withf(|tour| tour.slug == "the-sea-explorer" && tour.ratings_average == 4.5)
            .times(1)
            .returning(|tour| Ok(tour));

        let service = TourService::new(Arc::new(repository));

        let tour = service
            .create_tour(command("The Sea Explorer"))
            .await
            .unwrap();
        assert_eq!(tour.name.as_str(), "The Sea Explorer");
    }

    #[tokio::test]
    async fn test_create_tour_invalid_discount_never_reaches_storage() {
        let mut repository = MockTestTourRepository::new();
        repository.expect_create().times(0);

        let service = TourService::new(Arc::new(repository));

        let mut cmd = command("The Sea Explorer");
        cmd.price_discount = Some(600.0);

        let result = service.create_tour(cmd).await;
        assert!(matches!(result, Err(TourError::InvalidField(_))));
    }

    #[tokio::test]
    async fn test_get_secret_tour_is_not_found() {
        let mut repository = MockTestTourRepository::new();

        let mut cmd = command("The Secret Retreat");
        cmd.secret_tour = true;
        let tour = Tour::create(cmd, Utc::now()).unwrap();
        let tour_id = tour.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(tour.clone())));

        let service = TourService::new(Arc::new(repository));

        let result = service.get_tour(&tour_id).await;
        assert!(matches!(result, Err(TourError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_tour_not_found() {
        let mut repository = MockTestTourRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = TourService::new(Arc::new(repository));

        let result = service
            .update_tour(&TourId::new(), UpdateTourCommand::default())
            .await;
        assert!(matches!(result, Err(TourError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_tour_success() {
        let mut repository = MockTestTourRepository::new();
        let tour = Tour::create(command("The Sea Explorer"), Utc::now()).unwrap();
        let tour_id = tour.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == tour_id)
            .times(1)
            .returning(move |_| Ok(Some(tour.clone())));
        repository
            .expect_update()
            .withf(|tour| tour.price == 550.0)
            .times(1)
            .returning(|tour| Ok(tour));

        let service = TourService::new(Arc::new(repository));

        let updated = service
            .update_tour(
                &tour_id,
                UpdateTourCommand {
                    price: Some(550.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 550.0);
    }

    #[tokio::test]
    async fn test_delete_tour_not_found() {
        let mut repository = MockTestTourRepository::new();
        let tour_id = TourId::new();

        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(TourError::NotFound(tour_id.to_string())));

        let service = TourService::new(Arc::new(repository));

        let result = service.delete_tour(&tour_id).await;
        assert!(matches!(result, Err(TourError::NotFound(_))));
    }
}
