//! In-memory student registry guarded by a single readers-writer lock.
//!
//! The lock is held only for the map access itself; callers validate, decode, and talk to the
//! summarizer outside of it. Every write replaces a whole record, so readers never observe a
//! partially built entry.

use crate::model::{Student, StudentId};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures reported by store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists under the requested id.
    #[error("Student {0} not found")]
    NotFound(StudentId),
    /// A record already exists under the id being inserted.
    #[error("Student {0} already exists")]
    Conflict(StudentId),
}

/// Process-lifetime student registry; construct once and share through an `Arc`.
#[derive(Debug, Default)]
pub struct StudentStore {
    records: RwLock<BTreeMap<StudentId, Student>>,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record. Callers must not rely on the order.
    pub async fn list_all(&self) -> Vec<Student> {
        let records = self.records.read().await;
        records.values().cloned().collect()
    }

    /// Fetch a copy of one record.
    pub async fn get(&self, id: StudentId) -> Result<Student, StoreError> {
        let records = self.records.read().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Store `student` under its own id unless that id is taken.
    pub async fn insert(&self, student: Student) -> Result<Student, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&student.id) {
            return Err(StoreError::Conflict(student.id));
        }
        records.insert(student.id, student.clone());
        Ok(student)
    }

    /// Overwrite the record under `id`; the payload's own id is replaced by `id`.
    pub async fn replace(
        &self,
        id: StudentId,
        mut student: Student,
    ) -> Result<Student, StoreError> {
        student.id = id;
        let mut records = self.records.write().await;
        let slot = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = student.clone();
        Ok(student)
    }

    /// Remove the record under `id`, returning what was stored.
    pub async fn delete(&self, id: StudentId) -> Result<Student, StoreError> {
        let mut records = self.records.write().await;
        records.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
