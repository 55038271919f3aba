//! Shared test helpers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::publisher::{PublishRequest, Publisher};
use crate::storage::{KeyValueStore, MemoryStore, StoreError};
use crate::workflow::Workflow;
use crate::AppState;

/// Publisher fake that records every request and replays a fixed answer.
pub struct RecordingPublisher {
    answer: Result<String>,
    pub calls: Mutex<Vec<PublishRequest>>,
}

impl RecordingPublisher {
    pub fn succeeding(url: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: LinkError) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.answer.clone()
    }
}

/// In-memory store whose reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    /// Slot writes still allowed; `None` means unlimited.
    write_budget: Mutex<Option<usize>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    /// Allow `n` more slot writes, then fail every write.
    pub fn fail_writes_after(&self, n: usize) {
        *self.write_budget.lock().unwrap() = Some(n);
    }

    fn spend(&self, writes: usize) -> Result<(), StoreError> {
        let mut budget = self.write_budget.lock().unwrap();
        match *budget {
            Some(left) if left < writes => Err(StoreError::Poisoned),
            Some(left) => {
                *budget = Some(left - writes);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl KeyValueStore for FaultyStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Poisoned);
        }
        self.inner.get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        self.spend(1)?;
        self.inner.set(slot, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        self.spend(entries.len())?;
        self.inner.set_many(entries)
    }
}

/// Create a test AppState backed by an in-memory store.
pub fn test_state(publisher: Arc<dyn Publisher>) -> Arc<AppState> {
    test_state_with_store(Arc::new(MemoryStore::new()), publisher)
}

pub fn test_state_with_store(
    kv: Arc<dyn KeyValueStore>,
    publisher: Arc<dyn Publisher>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: Config::default(),
        workflow: Workflow::new(kv, publisher),
    })
}
