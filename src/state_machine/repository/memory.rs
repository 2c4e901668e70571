//! In-memory repository for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::state_machine::repository::{IntakeRepository, RepositoryError};
use crate::state_machine::state::{SellerRecord, SenderId};

/// A `HashMap` behind an async lock. State is lost on restart, which is
/// fine for tests and throwaway local runs.
pub struct InMemoryRepository {
    records: RwLock<HashMap<SenderId, SellerRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        InMemoryRepository {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntakeRepository for InMemoryRepository {
    async fn get(&self, sender: &SenderId) -> Result<Option<SellerRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(sender).cloned())
    }

    async fn upsert(&self, record: &SellerRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.insert(record.sender_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, sender: &SenderId) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.remove(sender);
        Ok(())
    }
}
