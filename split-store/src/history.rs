//! Bounded calculation history.
//!
//! The store owns an in-memory list of the five most recent calculations,
//! most-recent-first, mirrored into the key-value surface as a versioned
//! JSON blob. A malformed or unversioned blob is discarded wholesale on
//! hydrate rather than partially trusted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use split_core::{CalculationInput, CalculationResult, HistoryEntry};

use crate::kv::{KeyValueStore, StoreError};

/// Key under which the history blob is persisted.
pub const HISTORY_KEY: &str = "history";

/// Maximum number of retained entries; the oldest is evicted beyond this.
pub const HISTORY_CAPACITY: usize = 5;

/// Bump when the persisted shape changes; older blobs are discarded.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryBlob {
    version: u32,
    entries: Vec<HistoryEntry>,
}

/// History of past calculations, backed by a key-value store.
#[derive(Debug)]
pub struct HistoryStore<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Entries in most-recent-first order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(
        &self,
        id: Uuid,
    ) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Reads the persisted history into memory.
    ///
    /// Anything that fails to parse as the current schema is removed from
    /// the store and the history starts empty; only I/O errors surface.
    pub fn hydrate(&mut self) -> Result<(), StoreError> {
        self.entries.clear();

        let Some(text) = self.store.get(HISTORY_KEY)? else {
            return Ok(());
        };

        match serde_json::from_str::<HistoryBlob>(&text) {
            Ok(blob) if blob.version == SCHEMA_VERSION => {
                debug!(entries = blob.entries.len(), "history hydrated");
                self.entries = blob.entries;
            }
            Ok(blob) => {
                warn!(version = blob.version, "unsupported history schema version, discarding");
                self.store.remove(HISTORY_KEY)?;
            }
            Err(error) => {
                warn!(%error, "malformed history blob, discarding");
                self.store.remove(HISTORY_KEY)?;
            }
        }
        Ok(())
    }

    /// Records a successful calculation.
    ///
    /// A no-op unless the bill and the per-person total are both positive,
    /// so "no bill entered yet" results never reach the history.
    pub fn record(
        &mut self,
        input: &CalculationInput,
        result: &CalculationResult,
        round_up: bool,
    ) -> Result<(), StoreError> {
        let bill = input.bill_amount.unwrap_or(Decimal::ZERO);
        if bill <= Decimal::ZERO || result.total_per_person <= Decimal::ZERO {
            return Ok(());
        }

        self.entries
            .insert(0, HistoryEntry::new(input.clone(), result, round_up));
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Extracts a stored input and its saved rounding flag for replay.
    /// Does not mutate the history.
    pub fn load(
        &self,
        id: Uuid,
    ) -> Option<(CalculationInput, bool)> {
        self.get(id)
            .map(|entry| (entry.input.clone(), entry.round_up_at_save))
    }

    /// Empties the history and removes its persisted representation.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    /// Writes the in-memory list back to the store.
    ///
    /// Skipped when the list is empty and nothing is persisted, so a fresh
    /// profile stays clean; an empty list still overwrites an existing blob.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        if self.entries.is_empty() && self.store.get(HISTORY_KEY)?.is_none() {
            return Ok(());
        }

        let blob = HistoryBlob {
            version: SCHEMA_VERSION,
            entries: self.entries.clone(),
        };
        let text = serde_json::to_string(&blob)?;
        self.store.set(HISTORY_KEY, &text)
    }
}
