use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{CartSlot, Result, SlotError};

#[derive(Debug, Default)]
struct InMemorySlotState {
    values: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

/// In-memory slot implementation for testing.
///
/// Clones share the same storage, so a test can keep a handle and inspect
/// what the cart store wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemorySlot {
    state: Arc<RwLock<InMemorySlotState>>,
}

impl InMemorySlot {
    /// Creates a new empty in-memory slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value without going through `write`, e.g. to seed a
    /// corrupt payload.
    pub async fn insert_raw(&self, key: &str, value: impl Into<String>) {
        self.state
            .write()
            .await
            .values
            .insert(key.to_string(), value.into());
    }

    /// Returns the raw value stored under `key`.
    pub async fn get_raw(&self, key: &str) -> Option<String> {
        self.state.read().await.values.get(key).cloned()
    }

    /// Returns how many successful writes have been made.
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }

    /// Configures the slot to reject every subsequent write.
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.write().await.fail_writes = fail;
    }
}

#[async_trait]
impl CartSlot for InMemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.read().await.values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_writes {
            return Err(SlotError::Unavailable("quota exceeded".to_string()));
        }
        state.values.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}
