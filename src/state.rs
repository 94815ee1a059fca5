use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::config::AdminConfig;
use crate::auth::session::SessionManager;
use crate::db::collection::Collection;
use crate::db::dropdowns::{NavbarDropdownStore, VideosDropdownStore};
use crate::db::models::{Blog, Event, Gallery, Objective, SliderImage};
use crate::db::session_slot::JsonSessionSlot;
use crate::db::store::JsonStore;
use crate::storage::client::StorageClient;

/// Default cap on request bodies, uploads included.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageClient>,
    pub blogs: Collection<Blog>,
    pub events: Collection<Event>,
    pub galleries: Collection<Gallery>,
    pub slider: Collection<SliderImage>,
    pub objectives: Collection<Objective>,
    pub videos: VideosDropdownStore,
    pub navbar: NavbarDropdownStore,
    pub sessions: SessionManager,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire every collection and the session slot to one storage backend.
    pub fn new(storage: Arc<dyn StorageClient>, admin: AdminConfig) -> Self {
        let store = JsonStore::new(storage.clone());
        let slot = Arc::new(JsonSessionSlot::new(store.clone()));

        Self {
            storage,
            blogs: Collection::new(store.clone()),
            events: Collection::new(store.clone()),
            galleries: Collection::new(store.clone()),
            slider: Collection::new(store.clone()),
            objectives: Collection::new(store.clone()),
            videos: VideosDropdownStore::new(store.clone()),
            navbar: NavbarDropdownStore::new(store),
            sessions: SessionManager::new(admin, slot),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Bring every record collection up to the current format.
    ///
    /// Returns `false` if any collection failed to save.
    pub async fn migrate_all(&self) -> bool {
        let results = [
            self.blogs.migrate().await,
            self.events.migrate().await,
            self.galleries.migrate().await,
            self.slider.migrate().await,
            self.objectives.migrate().await,
        ];
        results.iter().all(|ok| *ok)
    }
}

macro_rules! collection_from_ref {
    ($($field:ident: $record:ty),* $(,)?) => {
        $(
            impl FromRef<AppState> for Collection<$record> {
                fn from_ref(state: &AppState) -> Self {
                    state.$field.clone()
                }
            }
        )*
    };
}

collection_from_ref!(
    blogs: Blog,
    events: Event,
    galleries: Gallery,
    slider: SliderImage,
    objectives: Objective,
);
