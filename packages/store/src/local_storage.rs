//! # Browser local storage - web-side persistence
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! mirrors sessions into `window.localStorage`, which is shared by every tab
//! of the same origin and survives reloads.
//!
//! `LocalStorage` is a zero-size handle that looks up `window.localStorage` on
//! every call; `web_sys::Storage` is not `Clone` and the lookup is cheap.
//!
//! ## Error mapping
//!
//! | Condition | Error |
//! |-----------|-------|
//! | no `window`, or `localStorage` access throws (storage disabled) | [`StorageError::Unavailable`] |
//! | `setItem` throws | [`StorageError::QuotaExceeded`] |
//! | `getItem` / `removeItem` throws | [`StorageError::Unavailable`] |

use wasm_bindgen::JsValue;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(describe(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::QuotaExceeded(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }
}
