use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use pixel_trader::domain::OpportunityRecord;
use pixel_trader::error::{Error, Result};
use pixel_trader::store::OpportunityStore;

/// Store accepting `successes` non-empty appends, then failing every write.
#[derive(Debug)]
pub struct FailingStore {
    successes: AtomicUsize,
    records: Mutex<Vec<OpportunityRecord>>,
}

impl FailingStore {
    pub fn new(successes: usize) -> Self {
        Self {
            successes: AtomicUsize::new(successes),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }
}

impl OpportunityStore for FailingStore {
    fn load(&self) -> Result<Vec<OpportunityRecord>> {
        Ok(self.records.lock().clone())
    }

    fn append(&self, records: &[OpportunityRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let remaining = self.successes.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(Error::Io(io::Error::other("disk full")));
        }
        self.successes.store(remaining - 1, Ordering::SeqCst);
        self.records.lock().extend_from_slice(records);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.records.lock().clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
