use foundation::RecordId;

use crate::record::Record;

/// Selection cursor holding at most one record identity.
///
/// The cursor never owns a record: it is re-resolved by id against whatever
/// collection is active, so it survives wholesale regeneration of records.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    id: Option<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.id == Some(id)
    }

    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: RecordId) -> bool {
        let changed = self.id != Some(id);
        self.id = Some(id);
        changed
    }

    pub fn clear(&mut self) -> bool {
        self.id.take().is_some()
    }

    /// Drops the selection if its id is absent from `active`.
    ///
    /// Never picks a replacement. Returns `true` if the selection was cleared.
    pub fn resolve(&mut self, active: &[Record]) -> bool {
        let Some(id) = self.id else {
            return false;
        };
        if active.iter().any(|r| r.id == id) {
            return false;
        }
        tracing::debug!("selection {id} no longer in active collection; clearing");
        self.id = None;
        true
    }
}
