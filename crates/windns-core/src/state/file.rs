// # File State Store
//
// File-based implementation of StateStore with crash recovery.
//
// ## Crash Recovery
//
// - Atomic writes: write to `<path>.tmp`, then rename
// - Backup: the previous file is copied to `<path>.backup` before each write
// - Recovery: an unparseable state file is replaced by its backup
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "resources": {
//     "web_a": {
//       "data": {
//         "zone_name": "contoso.com",
//         "record_name": "web",
//         "record_type": "A",
//         "ipv4address": "10.0.0.5",
//         "id": "contoso.com_web_A"
//       },
//       "last_updated": "2025-01-09T12:00:00Z"
//     }
//   }
// }
// ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::resource::ResourceData;
use crate::traits::state_store::{StateRecord, StateStore};

/// State file format version
const STATE_FILE_VERSION: &str = "1.0";

type Resources = HashMap<String, StateRecord>;

/// File-based state store with crash recovery
///
/// Every mutation is written through to disk immediately.
///
/// # Example
///
/// ```rust,no_run
/// use windns_core::state::FileStateStore;
/// use windns_core::traits::StateStore;
/// use windns_core::ResourceData;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("/var/lib/windns/state.json").await?;
///
///     let data = ResourceData::new("contoso.com", "web", "A").with_ipv4address("10.0.0.5");
///     store.set_resource("web_a", &data).await?;
///
///     let stored = store.get_resource("web_a").await?;
///     assert!(stored.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    resources: Arc<RwLock<Resources>>,
}

/// Serializable state file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StateFileFormat {
    version: String,
    resources: Resources,
}

impl FileStateStore {
    /// Create or load a file state store
    ///
    /// Creates parent directories if needed. A corrupted file is recovered
    /// from its backup; if that fails too the store starts empty.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create state directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let resources = Self::load_state_with_recovery(&path).await?;

        Ok(Self {
            path,
            resources: Arc::new(RwLock::new(resources)),
        })
    }

    /// The path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_state_with_recovery(path: &Path) -> Result<Resources, Error> {
        match Self::load_state(path).await {
            Ok(resources) => {
                tracing::debug!("Loaded state from file: {} resources", resources.len());
                Ok(resources)
            }
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "State file {} appears corrupted: {}. Attempting recovery from backup.",
                    path.display(),
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty state.");
                    return Ok(HashMap::new());
                }

                match Self::load_state(&backup_path).await {
                    Ok(resources) => {
                        tracing::info!("Recovered state from backup: {} resources", resources.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore state file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(resources)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also unreadable: {}. Starting with empty state.",
                            backup_err
                        );
                        Ok(HashMap::new())
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn load_state(path: &Path) -> Result<Resources, Error> {
        if !path.exists() {
            tracing::debug!("State file does not exist: {}", path.display());
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::state_store(format!(
                "Failed to read state file {}: {}",
                path.display(),
                e
            ))
        })?;

        let state_file: StateFileFormat = serde_json::from_str(&content)?;

        if state_file.version != STATE_FILE_VERSION {
            tracing::warn!(
                "State file version mismatch: expected {}, got {}. Attempting to load anyway.",
                STATE_FILE_VERSION,
                state_file.version
            );
        }

        Ok(state_file.resources)
    }

    async fn write_state(&self) -> Result<(), Error> {
        // Held for the whole write so concurrent writers cannot interleave
        let resources = self.resources.write().await;

        let state_file = StateFileFormat {
            version: STATE_FILE_VERSION.to_string(),
            resources: resources.clone(),
        };
        let json = serde_json::to_string_pretty(&state_file)?;

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.flush().await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::state_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("State written to file: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get_resource(&self, address: &str) -> Result<Option<StateRecord>, Error> {
        Ok(self.resources.read().await.get(address).cloned())
    }

    async fn set_resource(&self, address: &str, data: &ResourceData) -> Result<(), Error> {
        self.resources
            .write()
            .await
            .insert(address.to_string(), StateRecord::new(data.clone()));
        self.write_state().await
    }

    async fn delete_resource(&self, address: &str) -> Result<(), Error> {
        self.resources.write().await.remove(address);
        self.write_state().await
    }

    async fn list_resources(&self) -> Result<Vec<String>, Error> {
        Ok(self.resources.read().await.keys().cloned().collect())
    }

    /// No-op: every mutation is already on disk
    async fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn web(ip: &str) -> ResourceData {
        let mut data = ResourceData::new("contoso.com", "web", "A").with_ipv4address(ip);
        data.set_id("contoso.com_web_A");
        data
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStateStore::new(&path).await.unwrap();
        assert!(store.list_resources().await.unwrap().is_empty());

        store.set_resource("web", &web("10.0.0.5")).await.unwrap();
        assert!(path.exists());

        let reopened = FileStateStore::new(&path).await.unwrap();
        let stored = reopened.get_resource("web").await.unwrap().unwrap();
        assert_eq!(stored.data, web("10.0.0.5"));
    }

    #[tokio::test]
    async fn test_writes_land_without_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStateStore::new(&path).await.unwrap();
        store.set_resource("web", &web("10.0.0.5")).await.unwrap();
        let written = fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("contoso.com_web_A"));

        store.flush().await.unwrap();
        assert_eq!(fs::read_to_string(&path).await.unwrap(), written);
    }

    #[tokio::test]
    async fn test_file_store_delete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStateStore::new(&path).await.unwrap();
        store.set_resource("web", &web("10.0.0.5")).await.unwrap();
        store.delete_resource("web").await.unwrap();

        let reopened = FileStateStore::new(&path).await.unwrap();
        assert!(reopened.get_resource("web").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_corruption_recovery() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStateStore::new(&path).await.unwrap();
        store.set_resource("web", &web("10.0.0.5")).await.unwrap();
        // Second write leaves the first one in the backup
        store.set_resource("web", &web("10.0.0.6")).await.unwrap();

        let backup_path = FileStateStore::backup_path(&path);
        assert!(backup_path.exists());

        fs::write(&path, b"corrupted json data").await.unwrap();

        let recovered = FileStateStore::new(&path).await.unwrap();
        let stored = recovered.get_resource("web").await.unwrap().unwrap();
        assert_eq!(stored.data, web("10.0.0.5"));
    }

    #[tokio::test]
    async fn test_corrupted_without_backup_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"{ not json").await.unwrap();

        let store = FileStateStore::new(&path).await.unwrap();
        assert!(store.list_resources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStateStore::new(&path).await.unwrap();
        store.set_resource("web", &web("10.0.0.5")).await.unwrap();
        assert!(path.exists());
    }
}
