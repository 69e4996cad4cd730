pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod subscribers;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use config::ClientConfig;
pub use models::{Role, Session, SessionKind, StorageKeys, UserProfile};
pub use session::{SessionError, SessionStore, Sessions, STORAGE_WARNING};
pub use storage::{KeyValueStore, StorageError};
pub use subscribers::{Subscribers, Subscription};
