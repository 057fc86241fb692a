//! Platform abstraction layer
//!
//! Handles browser/native differences for key-value storage:
//! LocalStorage on web, a JSON file on native, memory for tests.

pub mod storage;

pub use storage::{KeyValueStore, MemoryStore};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
