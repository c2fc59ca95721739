use foundation::RecordId;
use foundation::math::LatLng;
use foundation::time::Time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Available,
    Occupied,
}

/// Domain-specific payload carried by a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordMeta {
    #[default]
    None,
    /// Charging station capacity.
    Station {
        status: StationStatus,
        ports: u32,
        available_ports: u32,
    },
    /// Municipal complaint.
    Incident {
        incident_type: String,
        reported_at: Time,
    },
}

/// One geotagged entity shown on the map and in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub position: LatLng,
    pub name: String,
    pub address: String,
    pub category: String,
    #[serde(default)]
    pub meta: RecordMeta,
}

impl Record {
    pub fn new(id: u64, position: LatLng, name: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            position,
            name: name.into(),
            address: String::new(),
            category: String::new(),
            meta: RecordMeta::None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_meta(mut self, meta: RecordMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn reported_at(&self) -> Option<Time> {
        match &self.meta {
            RecordMeta::Incident { reported_at, .. } => Some(*reported_at),
            _ => None,
        }
    }

    pub fn station_status(&self) -> Option<StationStatus> {
        match &self.meta {
            RecordMeta::Station { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_incident(&self) -> bool {
        matches!(self.meta, RecordMeta::Incident { .. })
    }
}
