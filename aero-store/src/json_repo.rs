use aero_core::{BookingRepository, DraftRepository, StorageError, BOOKINGS_KEY, DRAFT_KEY};
use aero_shared::{Booking, Draft};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::kv::KeyValueStore;

/// Booking list and draft stored as JSON blobs in a key-value store.
///
/// Unreadable or malformed blobs are logged and read as empty.
#[derive(Debug, Clone)]
pub struct JsonRepository<S> {
    store: S,
}

impl<S: KeyValueStore> JsonRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read `{}`, treating it as empty: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Malformed data under `{}`, treating it as empty: {}", key, e);
                None
            }
        }
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }
}

impl<S: KeyValueStore> BookingRepository for JsonRepository<S> {
    /// Records are decoded one at a time; a record that no longer fits the
    /// model is skipped without losing the rest of the list.
    fn load(&self) -> Vec<Booking> {
        let records: Vec<serde_json::Value> = self.read(BOOKINGS_KEY).unwrap_or_default();
        let total = records.len();

        let bookings: Vec<Booking> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(booking) => Some(booking),
                Err(e) => {
                    warn!("Skipping unreadable booking #{} under `{}`: {}", index, BOOKINGS_KEY, e);
                    None
                }
            })
            .collect();

        debug!("Loaded {} of {} bookings", bookings.len(), total);
        bookings
    }

    fn save(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        if bookings.is_empty() {
            return self.store.remove(BOOKINGS_KEY);
        }
        self.write(BOOKINGS_KEY, bookings)
    }
}

impl<S: KeyValueStore> DraftRepository for JsonRepository<S> {
    fn load(&self) -> Option<Draft> {
        self.read(DRAFT_KEY)
    }

    fn save(&self, draft: &Draft) -> Result<(), StorageError> {
        self.write(DRAFT_KEY, draft)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(DRAFT_KEY)
    }
}
