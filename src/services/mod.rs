// Service exports
pub mod documents;
pub mod memory;
pub mod postgres;
pub mod store;

pub use documents::{DocumentClient, DocumentCollections, DocumentStoreError};
pub use memory::MemoryStore;
pub use postgres::{PostgresClient, PostgresError, StatusColumn};
pub use store::{ApplicationStore, PetStore, StoreError};
