//! Durable storage for the sender profile and closing remarks.

mod sqlite;

pub use sqlite::SqliteStore;

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::profile::SenderProfile;
use crate::template::ClosingRemarkTable;

/// Key under which the sender profile blob is stored.
pub const SENDER_PROFILE_KEY: &str = "sender_profile";
/// Key under which the closing remark overrides are stored.
pub const CLOSING_REMARKS_KEY: &str = "closing_remarks";

/// A string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the two persisted blobs.
///
/// Loads never fail: a missing or unreadable blob yields defaults. Saves are
/// write-through and a failed save is logged rather than returned, since the
/// in-memory state is still correct.
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load_profile(&self) -> SenderProfile {
        self.load_blob(SENDER_PROFILE_KEY, |json| serde_json::from_str(json))
    }

    pub fn load_closing_remarks(&self) -> ClosingRemarkTable {
        self.load_blob(CLOSING_REMARKS_KEY, ClosingRemarkTable::from_json)
    }

    pub fn save_profile(&self, profile: &SenderProfile) {
        self.save_blob(SENDER_PROFILE_KEY, profile);
    }

    pub fn save_closing_remarks(&self, remarks: &ClosingRemarkTable) {
        self.save_blob(CLOSING_REMARKS_KEY, remarks);
    }

    pub const fn inner(&self) -> &S {
        &self.store
    }

    fn load_blob<T: Default>(
        &self,
        key: &str,
        parse: impl FnOnce(&str) -> serde_json::Result<T>,
    ) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %format!("{e:#}"), "Failed to read from store, using defaults");
                return T::default();
            }
        };

        parse(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Stored value is corrupt, using defaults");
            T::default()
        })
    }

    fn save_blob<T: serde::Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(key, &json));

        match result {
            Ok(()) => tracing::debug!(key, "Saved to store"),
            Err(e) => tracing::warn!(key, error = %format!("{e:#}"), "Failed to save to store"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::template::TemplateKind;

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = ProfileStore::new(MemoryStore::default());

        assert_eq!(store.load_profile(), SenderProfile::default());
        assert_eq!(store.load_closing_remarks(), ClosingRemarkTable::default());
    }

    #[test]
    fn test_profile_round_trip_uses_camel_case_blob() {
        let store = ProfileStore::new(MemoryStore::default());
        let profile = SenderProfile {
            name: "김철수".to_string(),
            fixed_closing_remark: "감사합니다.".to_string(),
            ..SenderProfile::default()
        };

        store.save_profile(&profile);

        let raw = store.inner().get(SENDER_PROFILE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"fixedClosingRemark\":\"감사합니다.\""));
        assert_eq!(store.load_profile(), profile);
    }

    #[test]
    fn test_closing_remarks_round_trip() {
        let store = ProfileStore::new(MemoryStore::default());
        let mut remarks = ClosingRemarkTable::default();
        remarks.set(TemplateKind::BusinessTrip, "출장 승인 부탁드립니다.");

        store.save_closing_remarks(&remarks);

        let loaded = store.load_closing_remarks();
        assert_eq!(loaded.get(TemplateKind::BusinessTrip), "출장 승인 부탁드립니다.");
        assert_eq!(
            loaded.get(TemplateKind::AnnualLeave),
            TemplateKind::AnnualLeave.default_closing_remark()
        );
    }

    #[test]
    fn test_corrupt_blob_loads_defaults() {
        let memory = MemoryStore::default();
        memory.set(SENDER_PROFILE_KEY, "not json").unwrap();
        memory.set(CLOSING_REMARKS_KEY, "[1,2,3]").unwrap();
        let store = ProfileStore::new(memory);

        assert_eq!(store.load_profile(), SenderProfile::default());
        assert_eq!(store.load_closing_remarks(), ClosingRemarkTable::default());
    }
}
