use crate::domain::owner::{Owner, OwnerId};
use crate::domain::ports::OwnerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for owners and their subscriptions.
///
/// Uses `Arc<RwLock<HashMap<OwnerId, Owner>>>` to allow shared concurrent access.
/// Ideal for testing or single-run batches where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryOwnerStore {
    owners: Arc<RwLock<HashMap<OwnerId, Owner>>>,
}

impl InMemoryOwnerStore {
    /// Creates a new, empty in-memory owner store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerStore for InMemoryOwnerStore {
    async fn store(&self, owner: Owner) -> Result<()> {
        let mut owners = self.owners.write().await;
        owners.insert(owner.id, owner);
        Ok(())
    }

    async fn get(&self, owner_id: OwnerId) -> Result<Option<Owner>> {
        let owners = self.owners.read().await;
        Ok(owners.get(&owner_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Owner>> {
        let owners = self.owners.read().await;
        Ok(owners.values().cloned().collect())
    }
}
