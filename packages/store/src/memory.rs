use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::storage::{KeyValueStore, StorageError};

/// In-memory KeyValueStore for testing and the non-persistent fallback.
///
/// Clones share the same map, so two stores built on clones behave like two
/// page loads reading the same browser storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    limits: Arc<Mutex<Limits>>,
}

#[derive(Debug, Default)]
struct Limits {
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total size of keys plus values past `bytes`.
    pub fn with_quota(self, bytes: usize) -> Self {
        self.lock_limits().quota = Some(bytes);
        self
    }

    /// Make every subsequent call fail with [`StorageError::Unavailable`].
    pub fn disable(&self) {
        self.lock_limits().disabled = true;
    }

    pub fn enable(&self) {
        self.lock_limits().disabled = false;
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_limits(&self) -> MutexGuard<'_, Limits> {
        self.limits.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.lock_limits().disabled {
            return Err(StorageError::Unavailable("memory store disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.lock_entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        let quota = self.lock_limits().quota;
        let mut entries = self.lock_entries();
        if let Some(quota) = quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "writing {key} needs {} bytes, {} of {quota} in use",
                    key.len() + value.len(),
                    used
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.lock_entries().remove(key);
        Ok(())
    }
}
