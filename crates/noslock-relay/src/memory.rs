#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use noslock_crypto::DocumentId;

use crate::{Relay, RelayError};

/// In-memory relay node for testing and simulation
///
/// Records live in a shared `HashMap`, so clones see the same data. A
/// poisoned lock surfaces as `RelayError::Io` rather than a panic.
#[derive(Clone)]
pub struct MemoryRelay {
    name: String,
    max_record_len: Option<usize>,
    records: Arc<Mutex<HashMap<DocumentId, String>>>,
}

impl MemoryRelay {
    /// Empty node with no record size limit.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), max_record_len: None, records: Arc::default() }
    }

    /// Empty node refusing records longer than `max` bytes.
    pub fn with_record_limit(name: impl Into<String>, max: usize) -> Self {
        Self { max_record_len: Some(max), ..Self::new(name) }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map_or(0, |records| records.len())
    }

    /// True if nothing has been published here.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite a record directly, bypassing limits. For tests that need a
    /// corrupt or foreign payload on one node.
    pub fn insert_raw(&self, doc_id: DocumentId, payload: impl Into<String>) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(doc_id, payload.into());
        }
    }
}

#[async_trait]
impl Relay for MemoryRelay {
    fn name(&self) -> &str {
        &self.name
    }

    async fn publish(&self, doc_id: &DocumentId, payload: &str) -> Result<(), RelayError> {
        if let Some(max) = self.max_record_len {
            if payload.len() > max {
                return Err(RelayError::RecordTooLarge { len: payload.len(), max });
            }
        }

        let mut records =
            self.records.lock().map_err(|_| RelayError::Io("memory relay poisoned".to_string()))?;
        records.insert(*doc_id, payload.to_string());
        Ok(())
    }

    async fn fetch(&self, doc_id: &DocumentId) -> Result<Option<String>, RelayError> {
        let records =
            self.records.lock().map_err(|_| RelayError::Io("memory relay poisoned".to_string()))?;
        Ok(records.get(doc_id).cloned())
    }
}
