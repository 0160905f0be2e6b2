//! In-process opportunity store.

use parking_lot::Mutex;

use super::OpportunityStore;
use crate::domain::OpportunityRecord;
use crate::error::Result;

/// Keeps the opportunity log in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<OpportunityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl OpportunityStore for MemoryStore {
    fn load(&self) -> Result<Vec<OpportunityRecord>> {
        Ok(self.records.lock().clone())
    }

    fn append(&self, records: &[OpportunityRecord]) -> Result<()> {
        self.records.lock().extend_from_slice(records);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.records.lock().clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
