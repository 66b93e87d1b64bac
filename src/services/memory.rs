use crate::models::{AdoptionApplication, ApplicationStatus, FosterInterest, PetRecord};
use crate::services::documents::{decode_pet, ADOPTABLE_STATUS};
use crate::services::store::{ApplicationStore, PetStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process storage backend
///
/// Pets are kept in id order so listings are deterministic. Used for local
/// development (optionally seeded from a JSON file) and in tests.
#[derive(Default)]
pub struct MemoryStore {
    pets: RwLock<BTreeMap<String, PetRecord>>,
    applications: RwLock<Vec<AdoptionApplication>>,
    foster_interest: RwLock<Vec<FosterInterest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pets(pets: impl IntoIterator<Item = PetRecord>) -> Self {
        let pets = pets.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            pets: RwLock::new(pets),
            ..Default::default()
        }
    }

    /// Load pets from a JSON array of documents
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let documents: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        let pets = documents
            .iter()
            .map(decode_pet)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Seed(e.to_string()))?;

        tracing::info!("Seeded {} pets from {}", pets.len(), path.display());

        Ok(Self::with_pets(pets))
    }

    pub async fn insert_pet(&self, pet: PetRecord) {
        self.pets.write().await.insert(pet.id.clone(), pet);
    }

    pub async fn foster_interest(&self) -> Vec<FosterInterest> {
        self.foster_interest.read().await.clone()
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn list_adoptable(&self, limit: usize) -> Result<Vec<PetRecord>, StoreError> {
        let pets = self.pets.read().await;
        Ok(pets
            .values()
            .filter(|p| p.status.as_deref() == Some(ADOPTABLE_STATUS))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_pet(&self, pet_id: &str) -> Result<Option<PetRecord>, StoreError> {
        Ok(self.pets.read().await.get(pet_id).cloned())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert_application(
        &self,
        application: &AdoptionApplication,
    ) -> Result<(), StoreError> {
        self.applications.write().await.push(application.clone());
        Ok(())
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<AdoptionApplication>, StoreError> {
        Ok(self.applications.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_applications(
        &self,
        pet_id: &str,
        limit: usize,
    ) -> Result<Vec<AdoptionApplication>, StoreError> {
        let applications = self.applications.read().await;
        // Insertion order is submission order; walk it backwards for newest first.
        Ok(applications
            .iter()
            .rev()
            .filter(|a| a.pet_id == pet_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<bool, StoreError> {
        let mut applications = self.applications.write().await;
        match applications.iter_mut().find(|a| a.id == id) {
            Some(application) => {
                application.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_foster_interest(&self, interest: &FosterInterest) -> Result<(), StoreError> {
        self.foster_interest.write().await.push(interest.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pet(id: &str, status: &str) -> PetRecord {
        PetRecord {
            id: id.to_string(),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_lists_only_adoptable_in_id_order() {
        let store = MemoryStore::with_pets(vec![
            create_test_pet("c", "adoptable"),
            create_test_pet("a", "adoptable"),
            create_test_pet("b", "adopted"),
        ]);

        let ids: Vec<String> = store
            .list_adoptable(10)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store =
            MemoryStore::with_pets((0..5).map(|i| create_test_pet(&i.to_string(), "adoptable")));
        assert_eq!(store.list_adoptable(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_file() {
        let path = std::env::temp_dir().join(format!("pawlink-seed-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[
                {"$id": "s1", "status": "adoptable", "name": "Olive"},
                {"id": "s2", "status": "adoptable"}
            ]"#,
        )
        .unwrap();

        let store = MemoryStore::from_seed_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let pet = store.get_pet("s1").await.unwrap().unwrap();
        assert_eq!(pet.name.as_deref(), Some("Olive"));
        assert_eq!(store.list_adoptable(10).await.unwrap().len(), 2);
    }

    #[test]
    fn test_missing_seed_file() {
        let err = MemoryStore::from_seed_file("/definitely/not/here.json").err().unwrap();
        assert!(matches!(err, StoreError::Seed(_)));
    }
}
