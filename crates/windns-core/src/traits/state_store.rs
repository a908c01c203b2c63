// # State Store Trait
//
// Host-side storage for resource state.
//
// The provider itself keeps no state: the host hands it the last known
// resource data and stores whatever comes back. The `windns` command line
// driver plays the host role and keeps that data in a state store, keyed by
// resource address (e.g. "web_a").

use async_trait::async_trait;

use crate::resource::ResourceData;

/// Stored state for one resource
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateRecord {
    /// Resource data as returned by the last lifecycle call
    pub data: ResourceData,
    /// Timestamp of the last write
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl StateRecord {
    /// Create a new state record stamped with the current time
    pub fn new(data: ResourceData) -> Self {
        Self {
            data,
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Trait for state store implementations
///
/// All methods must be safe to call concurrently from multiple tasks.
/// Implementations may buffer writes; `flush()` must persist them.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the stored state of a resource
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StateRecord))`: The stored state
    /// - `Ok(None)`: Resource not tracked
    /// - `Err(Error)`: Storage error
    async fn get_resource(&self, address: &str) -> Result<Option<StateRecord>, crate::Error>;

    /// Create or replace the stored state of a resource
    async fn set_resource(&self, address: &str, data: &ResourceData) -> Result<(), crate::Error>;

    /// Forget a resource (no error if it was not tracked)
    async fn delete_resource(&self, address: &str) -> Result<(), crate::Error>;

    /// List all tracked resource addresses
    async fn list_resources(&self) -> Result<Vec<String>, crate::Error>;

    /// Persist any pending changes
    async fn flush(&self) -> Result<(), crate::Error>;
}
