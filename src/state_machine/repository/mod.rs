//! Persistence for seller records.
//!
//! The dispatcher only sees the [`IntakeRepository`] trait. Production
//! runs against Supabase; tests run against the in-memory map. Writes are
//! last-write-wins with no locking: Telegram delivers one user's messages
//! in order, and a lost race between two of their own messages only costs
//! one answer.

use async_trait::async_trait;
use thiserror::Error;

use crate::state_machine::state::{SellerRecord, SenderId};

mod memory;
mod supabase;

pub use memory::InMemoryRepository;
pub use supabase::SupabaseRepository;

/// Errors from the storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error during {operation}: {message}")]
    Storage { operation: String, message: String },
}

impl RepositoryError {
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        RepositoryError::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Storage operations for seller records, keyed by sender id.
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Fetch the record for one sender, if any exists.
    async fn get(&self, sender: &SenderId) -> Result<Option<SellerRecord>, RepositoryError>;

    /// Insert or overwrite the record under its own sender id.
    async fn upsert(&self, record: &SellerRecord) -> Result<(), RepositoryError>;

    /// Remove the record for one sender. Removing an absent record is not
    /// an error.
    async fn delete(&self, sender: &SenderId) -> Result<(), RepositoryError>;
}
