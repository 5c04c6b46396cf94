//! In-memory persistence for tests and dry runs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::model::EntityKind;
use crate::{Error, Result};
use super::{Persister, Snapshot};

/// Keeps the last snapshot of each table and the order tables were written in
#[derive(Debug, Default)]
pub struct MemoryPersister {
    tables: Mutex<HashMap<EntityKind, Snapshot>>,
    writes: Mutex<Vec<EntityKind>>,
    failing: AtomicBool,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// A persister whose writes all fail
    pub fn failing() -> Self {
        let persister = Self::default();
        persister.set_failing(true);
        persister
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Last snapshot written for a table
    pub fn snapshot(&self, kind: EntityKind) -> Option<Snapshot> {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
    }

    /// Tables written so far, oldest first
    pub fn writes(&self) -> Vec<EntityKind> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Persister for MemoryPersister {
    fn write_table(&self, snapshot: &Snapshot) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::other("simulated write failure")));
        }
        let kind = snapshot.kind();
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, snapshot.clone());
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).push(kind);
        Ok(())
    }
}
