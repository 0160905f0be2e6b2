//! JSON array file store.
//!
//! Every append loads the existing array, extends it and rewrites the whole
//! file. The rewrite goes through a temp file and a rename so a crash never
//! leaves a truncated log, but there is no coordination between processes:
//! two writers on the same path will lose each other's batches.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::OpportunityStore;
use crate::domain::OpportunityRecord;
use crate::error::Result;

/// Opportunity log kept as a single pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log, treating a missing or unreadable file as empty.
    fn read_best_effort(&self) -> Vec<OpportunityRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read opportunity log, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt opportunity log, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_all(&self, records: &[OpportunityRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }
}

impl OpportunityStore for JsonFileStore {
    fn load(&self) -> Result<Vec<OpportunityRecord>> {
        Ok(self.read_best_effort())
    }

    fn append(&self, records: &[OpportunityRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut all = self.read_best_effort();
        all.extend_from_slice(records);
        self.write_all(&all)?;

        debug!(
            path = %self.path.display(),
            appended = records.len(),
            total = all.len(),
            "Opportunity log updated"
        );
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
