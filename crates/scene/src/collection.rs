use std::collections::BTreeMap;
use std::sync::Arc;

use foundation::RecordId;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    DuplicateId(RecordId),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::DuplicateId(id) => write!(f, "duplicate record id {id}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Immutable snapshot of every record known to the view.
///
/// Regeneration produces a new snapshot; records are never edited in place.
/// Cloning shares the underlying storage.
///
/// Ordering contract:
/// - `records()` and `iter()` yield records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Arc<[Record]>,
    by_id: Arc<BTreeMap<RecordId, usize>>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Result<Self, SceneError> {
        let mut by_id = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id, index).is_some() {
                return Err(SceneError::DuplicateId(record.id));
            }
        }
        Ok(Self {
            records: records.into(),
            by_id: Arc::new(by_id),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.by_id.get(&id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for r in self.records.iter() {
            if !r.category.is_empty() && !out.contains(&r.category.as_str()) {
                out.push(r.category.as_str());
            }
        }
        out
    }
}
