use std::sync::Arc;

use super::models::Settings;
use super::{slots, KeyValueStore, StoreError};

/// Reads and writes the three settings slots.
#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read settings. A missing slot reads as an empty string.
    pub fn load(&self) -> Result<Settings, StoreError> {
        Ok(Settings {
            account: self.kv.get(slots::ACCOUNT)?.unwrap_or_default(),
            repository: self.kv.get(slots::REPOSITORY)?.unwrap_or_default(),
            credential: self.kv.get(slots::CREDENTIAL)?.unwrap_or_default(),
        })
    }

    /// Overwrite all three slots with the trimmed values.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let settings = settings.trimmed();
        self.kv.set_many(&[
            (slots::ACCOUNT, settings.account.as_str()),
            (slots::REPOSITORY, settings.repository.as_str()),
            (slots::CREDENTIAL, settings.credential.as_str()),
        ])?;
        tracing::debug!(
            account = %settings.account,
            repository = %settings.repository,
            "Saved settings"
        );
        Ok(())
    }
}
