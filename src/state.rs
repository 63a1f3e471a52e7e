use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::repositories::diary::{DiaryStore, FsDiaryStore};
use crate::services::auth::AuthGate;

/// The application's state: read-only configuration plus the two
/// core collaborators. Shared by cloning; nothing in here is mutable
/// across requests.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub settings: Settings,
    /// The authentication gate around the shared secret.
    pub auth: AuthGate,
    /// The entry store.
    pub store: Arc<dyn DiaryStore>,
}

impl AppState {
    /// Creates a new `AppState` from the loaded settings.
    ///
    /// Builds the file-backed store (ensuring the storage root exists)
    /// and the auth gate around the configured secret.
    pub fn new(settings: Settings, storage_root: impl Into<std::path::PathBuf>) -> Result<Self> {
        let store = FsDiaryStore::new(storage_root)?;
        tracing::info!("✅ Diary store rooted at {}", store.root().display());

        let auth = AuthGate::new(settings.security.password.clone());

        Ok(AppState {
            settings,
            auth,
            store: Arc::new(store),
        })
    }
}
