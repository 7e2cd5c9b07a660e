//! Order history store
//!
//! Binds the in-memory [`OrderHistory`] to a [`KeyValueStore`]. Each surface
//! loads on activation and every mutation is written back before the call
//! returns, so a killed process loses at most the decision in flight.

use thiserror::Error;
use tracing::{debug, info};

use crate::history::{decode, encode, OrderHistory};
use crate::storage::{KeyValueStore, StorageError};
use crate::types::Decision;

/// Preference key the history is stored under
pub const DEFAULT_HISTORY_KEY: &str = "orderHistory";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read order history: {0}")]
    Load(#[source] StorageError),
    #[error("Failed to persist order history: {0}")]
    Save(#[source] StorageError),
}

/// Persistent home of the order history
pub struct OrderHistoryStore<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> OrderHistoryStore<S> {
    /// Create a store using the default history key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_HISTORY_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted history; missing state yields an empty history
    pub fn load(&self) -> Result<OrderHistory, StoreError> {
        let raw = self.storage.read_string(&self.key).map_err(StoreError::Load)?;
        let history = match raw {
            Some(raw) => decode(&raw),
            None => OrderHistory::new(),
        };
        debug!("Loaded {} decision(s) from '{}'", history.len(), self.key);
        Ok(history)
    }

    /// Overwrite the persisted state with `history`
    pub fn save(&mut self, history: &OrderHistory) -> Result<(), StoreError> {
        let encoded = encode(history);
        self.storage
            .write_string(&self.key, &encoded)
            .map_err(StoreError::Save)
    }

    /// Append a decision and persist the result
    pub fn record_decision(
        &mut self,
        history: &mut OrderHistory,
        decision: Decision,
    ) -> Result<(), StoreError> {
        if let Some(evicted) = history.record_decision(decision) {
            debug!("{} order fell off the window", evicted);
        }
        debug!("Recorded {} ({} in window)", decision, history.len());
        self.save(history)
    }

    /// Clear the history and persist the empty state
    pub fn reset(&mut self, history: &mut OrderHistory) -> Result<(), StoreError> {
        let cleared = OrderHistory::new();
        self.save(&cleared)?;
        *history = cleared;
        info!("Order history cleared");
        Ok(())
    }

    pub fn acceptance_rate(&self, history: &OrderHistory) -> f64 {
        history.acceptance_rate()
    }

    pub fn fall_off_countdown(&self, history: &OrderHistory) -> Option<usize> {
        history.fall_off_countdown()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
