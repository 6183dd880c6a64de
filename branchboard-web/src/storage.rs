//! localStorage-backed settings store.

use branchboard_core::{SETTINGS_KEY, SettingsStore, Snapshot};

use crate::dom;

/// Durable store over the browser's `localStorage`, single JSON entry
/// under [`SETTINGS_KEY`]. A malformed entry reads back as absent; only
/// an unreachable or failing storage API is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSettingsStore;

impl LocalSettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("storage read failed: {0}")]
    Read(String),
}

impl SettingsStore for LocalSettingsStore {
    type Error = StorageError;

    fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))?;
        let text = serde_json::to_string(snapshot)?;
        storage
            .set_item(SETTINGS_KEY, &text)
            .map_err(|err| StorageError::Write(dom::js_error_message(&err)))
    }

    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Unavailable(dom::js_error_message(&err)))?;
        let raw = storage
            .get_item(SETTINGS_KEY)
            .map_err(|err| StorageError::Read(dom::js_error_message(&err)))?;
        // unparsable entries are treated as absent, never an error
        Ok(raw.as_deref().and_then(|text| serde_json::from_str(text).ok()))
    }
}
