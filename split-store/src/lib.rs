pub mod history;
pub mod kv;

pub use history::{HISTORY_CAPACITY, HISTORY_KEY, HistoryStore};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
