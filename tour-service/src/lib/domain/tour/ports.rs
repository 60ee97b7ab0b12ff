use async_trait::async_trait;

use crate::domain::tour::errors::TourError;
use crate::domain::tour::models::CreateTourCommand;
use crate::domain::tour::models::Tour;
use crate::domain::tour::models::TourId;
use crate::domain::tour::models::UpdateTourCommand;

/// Port for tour domain service operations.
#[async_trait]
pub trait TourServicePort: Send + Sync + 'static {
    /// List every tour that is not secret.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tours(&self) -> Result<Vec<Tour>, TourError>;

    /// Retrieve a non-secret tour by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Tour does not exist or is secret
    /// * `DatabaseError` - Database operation failed
    async fn get_tour(&self, id: &TourId) -> Result<Tour, TourError>;

    /// Create a new tour.
    ///
    /// # Errors
    /// * `InvalidField` - A field is out of range
    /// * `NameAlreadyExists` - Another tour has the same name
    /// * `DatabaseError` - Database operation failed
    async fn create_tour(&self, command: CreateTourCommand) -> Result<Tour, TourError>;

    /// Partially update an existing tour.
    ///
    /// # Errors
    /// * `NotFound` - Tour does not exist
    /// * `InvalidField` - The updated tour is out of range
    /// * `NameAlreadyExists` - Another tour has the same name
    /// * `DatabaseError` - Database operation failed
    async fn update_tour(&self, id: &TourId, command: UpdateTourCommand)
        -> Result<Tour, TourError>;

    /// Delete an existing tour.
    ///
    /// # Errors
    /// * `NotFound` - Tour does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_tour(&self, id: &TourId) -> Result<(), TourError>;
}

/// Persistence operations for tour aggregate.
#[async_trait]
pub trait TourRepository: Send + Sync + 'static {
    /// Persist new tour to storage.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another tour has the same name
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, tour: Tour) -> Result<Tour, TourError>;

    /// Retrieve tour by identifier, secret or not.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError>;

    /// Retrieve all non-secret tours, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_public(&self) -> Result<Vec<Tour>, TourError>;

    /// Update existing tour in storage.
    ///
    /// # Errors
    /// * `NotFound` - Tour does not exist
    /// * `NameAlreadyExists` - Another tour has the same name
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, tour: Tour) -> Result<Tour, TourError>;

    /// Remove tour from storage.
    ///
    /// # Errors
    /// * `NotFound` - Tour does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TourId) -> Result<(), TourError>;
}
