use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AdoptionApplication, ApplicationStatus, FosterInterest, PetRecord};
use crate::services::{DocumentStoreError, PostgresError};

/// Errors surfaced by any storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store error: {0}")]
    Documents(#[from] DocumentStoreError),

    #[error("Database error: {0}")]
    Postgres(#[from] PostgresError),

    #[error("Seed data error: {0}")]
    Seed(String),
}

/// Read access to pet listings
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Adoptable listings in a stable order, at most `limit` of them
    async fn list_adoptable(&self, limit: usize) -> Result<Vec<PetRecord>, StoreError>;

    async fn get_pet(&self, pet_id: &str) -> Result<Option<PetRecord>, StoreError>;
}

/// Persistence for adoption applications and foster interest forms
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert_application(&self, application: &AdoptionApplication) -> Result<(), StoreError>;

    async fn get_application(&self, id: Uuid) -> Result<Option<AdoptionApplication>, StoreError>;

    /// Applications for one pet, newest first
    async fn list_applications(
        &self,
        pet_id: &str,
        limit: usize,
    ) -> Result<Vec<AdoptionApplication>, StoreError>;

    /// Returns `false` when no application has this id
    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<bool, StoreError>;

    async fn insert_foster_interest(&self, interest: &FosterInterest) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
