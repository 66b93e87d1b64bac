use crate::models::PetRecord;
use crate::services::store::{PetStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Status value of listings that can be shown to adopters
pub const ADOPTABLE_STATUS: &str = "adoptable";

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in the document store
#[derive(Debug, Clone)]
pub struct DocumentCollections {
    pub pets: String,
}

/// Document store REST client (Appwrite databases API)
///
/// Handles:
/// - Listing adoptable pets for the ranking feeds
/// - Fetching a single pet by document id
pub struct DocumentClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: DocumentCollections,
}

impl DocumentClient {
    /// Create a new document store client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: DocumentCollections,
        timeout_secs: u64,
    ) -> Result<Self, DocumentStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    /// List adoptable pets ordered by document id
    pub async fn list_adoptable_pets(
        &self,
        limit: usize,
    ) -> Result<Vec<PetRecord>, DocumentStoreError> {
        let queries = [
            json!({"method": "equal", "attribute": "status", "values": [ADOPTABLE_STATUS]}),
            json!({"method": "orderAsc", "attribute": "$id"}),
            json!({"method": "limit", "values": [limit]}),
        ];

        let query_string = queries
            .iter()
            .map(|q| format!("queries[]={}", urlencoding::encode(&q.to_string())))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?{}", self.documents_url(&self.collections.pets), query_string);

        tracing::debug!("Listing adoptable pets (limit {})", limit);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DocumentStoreError::Unauthorized)
            }
            status => {
                return Err(DocumentStoreError::ApiError(format!(
                    "Failed to list pets: {}",
                    status
                )))
            }
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DocumentStoreError::InvalidResponse("Missing documents array".into()))?;

        let pets: Vec<PetRecord> = documents
            .iter()
            .filter_map(|doc| match decode_pet(doc) {
                Ok(pet) => Some(pet),
                Err(e) => {
                    tracing::warn!("Skipping unreadable pet document: {}", e);
                    None
                }
            })
            .take(limit)
            .collect();

        tracing::debug!("Listed {} adoptable pets (total: {})", pets.len(), total);

        Ok(pets)
    }

    /// Fetch a single pet, `None` when the document does not exist
    pub async fn fetch_pet(&self, pet_id: &str) -> Result<Option<PetRecord>, DocumentStoreError> {
        let url = format!(
            "{}/{}",
            self.documents_url(&self.collections.pets),
            urlencoding::encode(pet_id)
        );

        tracing::debug!("Fetching pet: {}", pet_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DocumentStoreError::Unauthorized)
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch pet {}: {} - {}", pet_id, status, body);
                return Err(DocumentStoreError::ApiError(format!(
                    "Failed to fetch pet: {}",
                    status
                )));
            }
        }

        let json: Value = response.json().await?;
        decode_pet(&json).map(Some)
    }
}

#[async_trait]
impl PetStore for DocumentClient {
    async fn list_adoptable(&self, limit: usize) -> Result<Vec<PetRecord>, StoreError> {
        Ok(self.list_adoptable_pets(limit).await?)
    }

    async fn get_pet(&self, pet_id: &str) -> Result<Option<PetRecord>, StoreError> {
        Ok(self.fetch_pet(pet_id).await?)
    }
}

/// Lift document metadata into pet fields
///
/// Attributes sit at the top level of the document, next to the `$`
/// metadata. `$id` always becomes `id`. `$createdAt` stands in for the
/// intake date only when the listing has no `createdAt` of its own.
pub(crate) fn normalize_document(doc: &Value) -> Result<Value, DocumentStoreError> {
    let mut object = doc
        .as_object()
        .cloned()
        .ok_or_else(|| DocumentStoreError::InvalidResponse("Document is not an object".into()))?;

    if let Some(id) = object.get("$id").cloned() {
        object.insert("id".to_string(), id);
    }

    let has_created_at = object.get("createdAt").map(|v| !v.is_null()).unwrap_or(false);
    if let (false, Some(created)) = (has_created_at, object.get("$createdAt").cloned()) {
        object.insert("createdAt".to_string(), created);
    }

    Ok(Value::Object(object))
}

pub(crate) fn decode_pet(doc: &Value) -> Result<PetRecord, DocumentStoreError> {
    let normalized = normalize_document(doc)?;
    serde_json::from_value(normalized)
        .map_err(|e| DocumentStoreError::InvalidResponse(format!("Failed to parse pet: {}", e)))
}
