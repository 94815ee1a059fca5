use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::store::JsonStore;

pub const SESSION_SLOT_RESOURCE: &str = "admin_session_data.json";

/// The single system-wide "who is the active admin" slot.
///
/// Whoever claims it last holds the only valid admin session; every other
/// session fails validation the next time it is checked.
#[async_trait]
pub trait SessionSlot: Send + Sync {
    /// Token currently holding the slot, if any.
    async fn current(&self) -> Option<String>;

    /// Put `token` in the slot, replacing whatever was there.
    async fn claim(&self, token: &str) -> bool;

    /// Empty the slot only if it still holds `token`.
    ///
    /// Returns `true` when the slot was cleared.
    async fn release_if(&self, token: &str) -> bool;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SlotData {
    #[serde(default)]
    session_token: Option<String>,
}

/// Slot persisted as `{session_token}` in the JSON store.
///
/// The mutex serializes claim and compare-and-clear inside this process, so a
/// stale logout cannot wipe a token written by a newer login.
pub struct JsonSessionSlot {
    store: JsonStore,
    lock: Mutex<()>,
}

impl JsonSessionSlot {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Option<String> {
        let data: SlotData = self.store.load(SESSION_SLOT_RESOURCE).await;
        data.session_token.filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl SessionSlot for JsonSessionSlot {
    async fn current(&self) -> Option<String> {
        self.read().await
    }

    async fn claim(&self, token: &str) -> bool {
        let _guard = self.lock.lock().await;
        let data = SlotData {
            session_token: Some(token.to_string()),
        };
        self.store.save(SESSION_SLOT_RESOURCE, &data).await
    }

    async fn release_if(&self, token: &str) -> bool {
        let _guard = self.lock.lock().await;
        if self.read().await.as_deref() != Some(token) {
            return false;
        }
        self.store
            .save(SESSION_SLOT_RESOURCE, &SlotData::default())
            .await
    }
}
