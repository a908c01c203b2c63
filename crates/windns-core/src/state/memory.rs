// # Memory State Store
//
// In-memory implementation of StateStore. Nothing survives a restart; useful
// for tests and one-shot runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::resource::ResourceData;
use crate::traits::state_store::{StateRecord, StateStore};

/// In-memory state store implementation
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<HashMap<String, StateRecord>>>,
}

impl MemoryStateStore {
    /// Create a new empty memory state store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of resources in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_resource(&self, address: &str) -> Result<Option<StateRecord>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(address).cloned())
    }

    async fn set_resource(&self, address: &str, data: &ResourceData) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.insert(address.to_string(), StateRecord::new(data.clone()));
        Ok(())
    }

    async fn delete_resource(&self, address: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.remove(address);
        Ok(())
    }

    async fn list_resources(&self) -> Result<Vec<String>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}
