use std::collections::HashMap;
use std::sync::Mutex;

use crate::CART_STORAGE_PREFIX;
use crate::domain::cart::CartItem;
use crate::repository::{CartStorage, StorageError, StorageResult};

/// Key under which a user's cart document is stored.
pub fn storage_key(user_id: &str) -> String {
    format!("{CART_STORAGE_PREFIX}{user_id}")
}

/// Key/value cart storage holding one JSON document per user.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored document for `key`, if any.
    pub fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    /// Overwrite the stored document for `key`.
    pub fn set_raw(&self, key: impl Into<String>, value: impl Into<String>) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.into(), value.into());
        Ok(())
    }
}

impl CartStorage for MemoryCartStorage {
    fn load_cart(&self, user_id: &str) -> StorageResult<Vec<CartItem>> {
        let key = storage_key(user_id);
        let Some(raw) = self.get_raw(&key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!("Discarding unreadable cart stored under `{key}`: {err}");
                Ok(Vec::new())
            }
        }
    }

    fn save_cart(&self, user_id: &str, items: &[CartItem]) -> StorageResult<()> {
        let document = serde_json::to_string(items)?;
        self.set_raw(storage_key(user_id), document)
    }
}
