use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// In-memory key-value store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::Poisoned)?;
        for (slot, value) in entries {
            slots.insert(slot.to_string(), value.to_string());
        }
        Ok(())
    }
}
