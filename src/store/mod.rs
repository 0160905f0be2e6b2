//! Append-only opportunity log.
//!
//! The orchestrator writes through the [`OpportunityStore`] trait so the
//! persistence policy is injected rather than implied by a global path.
//! [`JsonFileStore`] rewrites one JSON array file per batch; [`MemoryStore`]
//! keeps records in process.

mod json_file;
mod memory;

use crate::domain::OpportunityRecord;
use crate::error::Result;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Append-only sink for opportunity records.
///
/// Implementations assume a single writer.
pub trait OpportunityStore: Send + Sync {
    /// Load every stored record in append order.
    fn load(&self) -> Result<Vec<OpportunityRecord>>;

    /// Append a batch of records. Failures must be returned, never dropped.
    fn append(&self, records: &[OpportunityRecord]) -> Result<()>;

    /// Remove every stored record.
    fn clear(&self) -> Result<()>;

    /// Short description for logs (e.g. the file path).
    fn describe(&self) -> String;
}
