use crate::models::{AdoptionApplication, ApplicantContact, ApplicationStatus, FosterInterest};
use crate::services::store::{ApplicationStore, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored value: {0}")]
    InvalidValue(String),
}

/// Column type for application review states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum StatusColumn {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl From<ApplicationStatus> for StatusColumn {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Pending => StatusColumn::Pending,
            ApplicationStatus::Approved => StatusColumn::Approved,
            ApplicationStatus::Rejected => StatusColumn::Rejected,
            ApplicationStatus::Withdrawn => StatusColumn::Withdrawn,
        }
    }
}

impl From<StatusColumn> for ApplicationStatus {
    fn from(value: StatusColumn) -> Self {
        match value {
            StatusColumn::Pending => ApplicationStatus::Pending,
            StatusColumn::Approved => ApplicationStatus::Approved,
            StatusColumn::Rejected => ApplicationStatus::Rejected,
            StatusColumn::Withdrawn => ApplicationStatus::Withdrawn,
        }
    }
}

/// PostgreSQL client for adoption applications and foster interest forms
///
/// Pets live in the document store; submissions from adopters are kept
/// here so they can be reviewed and tracked per pet.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Store a new adoption application
    pub async fn record_application(
        &self,
        application: &AdoptionApplication,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO adoption_applications
                (id, pet_id, email, applicant, answers, match_score, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(application.id)
            .bind(&application.pet_id)
            .bind(&application.applicant.email)
            .bind(Json(&application.applicant))
            .bind(&application.answers)
            .bind(application.match_score.map(i16::from))
            .bind(StatusColumn::from(application.status))
            .bind(application.submitted_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded application {} for pet {}",
            application.id,
            application.pet_id
        );

        Ok(())
    }

    pub async fn find_application(
        &self,
        id: Uuid,
    ) -> Result<Option<AdoptionApplication>, PostgresError> {
        let query = r#"
            SELECT id, pet_id, applicant, answers, match_score, status, submitted_at
            FROM adoption_applications
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(application_from_row).transpose()
    }

    /// Applications for a pet, newest first
    pub async fn applications_for_pet(
        &self,
        pet_id: &str,
        limit: usize,
    ) -> Result<Vec<AdoptionApplication>, PostgresError> {
        let query = r#"
            SELECT id, pet_id, applicant, answers, match_score, status, submitted_at
            FROM adoption_applications
            WHERE pet_id = $1
            ORDER BY submitted_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(pet_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let applications = rows
            .iter()
            .map(application_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Pet {} has {} applications", pet_id, applications.len());

        Ok(applications)
    }

    /// Change the review state of an application
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            UPDATE adoption_applications
            SET status = $2
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(StatusColumn::from(status))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn record_foster_interest(
        &self,
        interest: &FosterInterest,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO foster_interest (id, email, applicant, answers, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(interest.id)
            .bind(&interest.applicant.email)
            .bind(Json(&interest.applicant))
            .bind(&interest.answers)
            .bind(StatusColumn::from(interest.status))
            .bind(interest.submitted_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded foster interest {}", interest.id);

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn application_from_row(row: &PgRow) -> Result<AdoptionApplication, PostgresError> {
    let applicant: Json<ApplicantContact> = row.try_get("applicant")?;
    let match_score: Option<i16> = row.try_get("match_score")?;
    let status: StatusColumn = row.try_get("status")?;

    let match_score = match_score
        .map(|s| {
            u8::try_from(s)
                .map_err(|_| PostgresError::InvalidValue(format!("match_score {}", s)))
        })
        .transpose()?;

    Ok(AdoptionApplication {
        id: row.try_get("id")?,
        pet_id: row.try_get("pet_id")?,
        applicant: applicant.0,
        answers: row.try_get("answers")?,
        match_score,
        status: status.into(),
        submitted_at: row.try_get("submitted_at")?,
    })
}

#[async_trait]
impl ApplicationStore for PostgresClient {
    async fn insert_application(
        &self,
        application: &AdoptionApplication,
    ) -> Result<(), StoreError> {
        Ok(self.record_application(application).await?)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<AdoptionApplication>, StoreError> {
        Ok(self.find_application(id).await?)
    }

    async fn list_applications(
        &self,
        pet_id: &str,
        limit: usize,
    ) -> Result<Vec<AdoptionApplication>, StoreError> {
        Ok(self.applications_for_pet(pet_id, limit).await?)
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<bool, StoreError> {
        Ok(self.set_status(id, status).await?)
    }

    async fn insert_foster_interest(&self, interest: &FosterInterest) -> Result<(), StoreError> {
        Ok(self.record_foster_interest(interest).await?)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(PostgresClient::health_check(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_column_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Withdrawn,
        ] {
            assert_eq!(ApplicationStatus::from(StatusColumn::from(status)), status);
        }
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_health_check() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let client = PostgresClient::from_settings(&url, Some(2), Some(1), None, None)
            .await
            .expect("Failed to connect");
        assert!(client.health_check().await.unwrap());
    }
}
