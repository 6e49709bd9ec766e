//! # Adapters Module
//!
//! Relationship Store implementations.
//!
//! ## Modules
//!
//! - `memory`: process-local store behind a single async lock
//! - `sqlite`: persistent store on `sqlx` (feature `sqlite`)

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryRelationshipStore;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteRelationshipStore, SqliteStoreBuilder};

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::errors::GraphError;
use crate::ports::outbound::RelationshipStore;
use std::sync::Arc;
use tracing::info;

/// Open the store selected by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RelationshipStore>, GraphError> {
    info!(backend = %config.backend, "opening relationship store");
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryRelationshipStore::new())),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => {
            let store = SqliteStoreBuilder::from_config(config).build().await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => Err(GraphError::Database(
            "sqlite backend not compiled in (enable the `sqlite` feature)".into(),
        )),
    }
}
