use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::client::StorageClient;

/// Loads and saves whole JSON resources through a [`StorageClient`].
///
/// Read paths never fail: a missing or corrupt resource yields the caller's
/// default and the problem is logged. Write paths report `false` on any error.
#[derive(Clone)]
pub struct JsonStore {
    storage: Arc<dyn StorageClient>,
}

impl JsonStore {
    pub fn new(storage: Arc<dyn StorageClient>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn StorageClient> {
        &self.storage
    }

    /// Load a resource, falling back to `T::default()` when absent or unreadable.
    pub async fn load<T>(&self, resource: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let bytes = match self.storage.get_object(resource).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::error!("Error loading {}: {}", resource, e);
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                // Corrupt data reads as empty to keep public pages available.
                tracing::error!("Error loading {}: {}", resource, e);
                T::default()
            }
        }
    }

    /// Overwrite a resource with pretty-printed JSON.
    pub async fn save<T>(&self, resource: &str, data: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let bytes = match serde_json::to_vec_pretty(data) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Error saving {}: {}", resource, e);
                return false;
            }
        };

        match self.storage.put_object(resource, bytes).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving {}: {}", resource, e);
                false
            }
        }
    }
}
