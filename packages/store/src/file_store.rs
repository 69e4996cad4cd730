//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that keeps each key in
//! its own file. It is used by the desktop client so sessions survive restarts
//! the same way browser local storage does.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── wellness.token        # raw token string
//! ├── wellness.user         # JSON user record
//! └── wellness.adminToken
//! ```
//!
//! Writes go to `<key>.tmp` first and are then renamed over the target, so a
//! crash mid-write leaves either the old value or the new one.
//!
//! ## Platform data directories
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/wellness/` |
//! | Linux | `~/.local/share/wellness/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\wellness\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::storage::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(sanitize(key))
    }
}

/// Keys are namespaced strings; anything outside `[A-Za-z0-9._-]` becomes `_`.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;
        let path = self.key_path(key);
        let tmp = self.base.join(format!("{}.tmp", sanitize(key)));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SessionKind, UserProfile};
    use crate::session::SessionStore;
    use crate::ClientConfig;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wellness_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = temp_dir("kv");
        let store = FileStore::new(dir.clone());

        assert_eq!(store.get("wellness.token").unwrap(), None);
        store.set("wellness.token", "abc").unwrap();
        assert_eq!(store.get("wellness.token").unwrap().as_deref(), Some("abc"));
        store.set("wellness.token", "def").unwrap();
        assert_eq!(store.get("wellness.token").unwrap().as_deref(), Some("def"));

        store.remove("wellness.token").unwrap();
        store.remove("wellness.token").unwrap();
        assert_eq!(store.get("wellness.token").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keys_cannot_escape_base_dir() {
        let dir = temp_dir("escape");
        let store = FileStore::new(dir.clone());
        store.set("../outside", "x").unwrap();
        assert!(dir.join(".._outside").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = temp_dir("session");
        let config = ClientConfig::default();
        let user = UserProfile::new(7, Role::User).with_name("Sam");

        let store = SessionStore::new(SessionKind::User, FileStore::new(dir.clone()), &config);
        store.commit("tok-file", user.clone()).unwrap();

        // Re-open from the same directory
        let reopened = SessionStore::new(SessionKind::User, FileStore::new(dir.clone()), &config);
        let session = reopened.load();
        assert_eq!(session.token(), Some("tok-file"));
        assert_eq!(session.user(), Some(&user));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
