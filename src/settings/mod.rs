//! Client preference persistence.
//!
//! `storage` provides the key-value backends; `store` layers the typed
//! `Settings` record and its forgiving load/save contract on top.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{SETTINGS_KEY, Settings, SettingsError, SettingsStore};
