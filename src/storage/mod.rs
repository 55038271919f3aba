pub mod db;
pub mod history;
mod memory;
pub mod models;
pub mod settings;
mod tables;

pub use db::{Database, StoreError};
pub use history::HistoryStore;
pub use memory::MemoryStore;
pub use settings::SettingsStore;
pub use tables::*;

/// Slot names shared with the upload page's storage layout.
pub mod slots {
    pub const ACCOUNT: &str = "github_username";
    pub const REPOSITORY: &str = "github_repo";
    pub const CREDENTIAL: &str = "github_token";
    pub const HISTORY: &str = "github_upload_history";
}

/// Abstraction over the persistent key-value store.
/// Values are opaque strings; callers own their encoding.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError>;
    /// Write several slots at once: either all of them land or none do.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;
}
