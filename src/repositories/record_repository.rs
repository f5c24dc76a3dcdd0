use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    constants::{IDENTITY_STORAGE_KEY, SESSION_STORAGE_KEY},
    errors::AppResult,
    models::domain::{Identity, QuizSession},
    repositories::KeyValueStore,
};

/// A typed JSON record stored under one key.
pub struct RecordRepository<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

pub type SessionRepository = RecordRepository<QuizSession>;
pub type IdentityRepository = RecordRepository<Identity>;

impl<T> RecordRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    /// Reads the record. Unreadable or unparseable records count as absent.
    pub fn load(&self) -> Option<T> {
        let raw = match self.store.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read record '{}': {}", self.key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Discarding malformed record '{}': {}", self.key, e);
                None
            }
        }
    }

    pub fn save(&self, record: &T) -> AppResult<()> {
        let json = serde_json::to_string(record)?;
        self.store.set(self.key, &json)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(self.key)
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl SessionRepository {
    pub fn sessions(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, SESSION_STORAGE_KEY)
    }
}

impl IdentityRepository {
    pub fn identities(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, IDENTITY_STORAGE_KEY)
    }
}
