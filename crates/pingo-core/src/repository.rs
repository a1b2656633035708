use crate::error::{Error, Result};
use crate::PingRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// An ordered collection of completed probe session records.
///
/// Records are kept in insertion order and are only ever appended or removed
/// by position.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Repository {
    records: Vec<PingRecord>,
}

impl Repository {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record and return its index.
    pub fn append(&mut self, record: PingRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Remove and return the record at `index`, shifting later records down.
    pub fn remove_at(&mut self, index: usize) -> Result<PingRecord> {
        if index < self.records.len() {
            Ok(self.records.remove(index))
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    #[must_use]
    pub fn list(&self) -> &[PingRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PingRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A [`Repository`] which may be mutated from many threads.
///
/// Note that this type is cheaply cloneable and all clones share the same
/// underlying repository.
#[derive(Debug, Clone, Default)]
pub struct SharedRepository {
    inner: Arc<Mutex<Repository>>,
}

impl SharedRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: PingRecord) -> usize {
        self.inner.lock().append(record)
    }

    pub fn remove_at(&self, index: usize) -> Result<PingRecord> {
        self.inner.lock().remove_at(index)
    }

    /// A copy of the repository at this point in time.
    #[must_use]
    pub fn snapshot(&self) -> Repository {
        self.inner.lock().clone()
    }
}
