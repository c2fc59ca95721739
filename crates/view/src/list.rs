use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::time::Time;
use layers::cluster::{Cluster, DisplayMode, RenderUnit};
use scene::record::{Record, RecordMeta, StationStatus};
use serde::Serialize;

pub const NO_RECORDS_IN_VIEW: &str = "No records in current view";
pub const NO_RECORDS_MATCH: &str = "No records match the current filters";

/// One record as the list shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub category: String,
    pub status: Option<StationStatus>,
    /// `(available, total)` ports for stations.
    pub ports: Option<(u32, u32)>,
    pub reported_at: Option<Time>,
    pub selected: bool,
}

impl RecordRow {
    pub fn from_record(record: &Record, selected: Option<RecordId>) -> Self {
        let (status, ports) = match &record.meta {
            RecordMeta::Station {
                status,
                ports,
                available_ports,
            } => (Some(*status), Some((*available_ports, *ports))),
            _ => (None, None),
        };
        Self {
            id: record.id,
            name: record.name.clone(),
            address: record.address.clone(),
            category: record.category.clone(),
            status,
            ports,
            reported_at: record.reported_at(),
            selected: selected == Some(record.id),
        }
    }
}

/// Aggregate row for a multi-record cluster.
///
/// Titled by member kind: "N stations" with an availability summary, "N
/// incidents", or "N records" when kinds are mixed or untyped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRow {
    /// Seed record id; stable for the lifetime of the cluster.
    pub key: RecordId,
    pub count: usize,
    pub title: String,
    pub summary: Option<String>,
    pub postal_codes: Vec<String>,
    pub bounds: GeoBounds,
}

impl ClusterRow {
    pub fn from_cluster(cluster: &Cluster) -> Option<Self> {
        let key = cluster.seed()?.id;
        let count = cluster.len();
        let availability = cluster.availability();
        let stations = availability.available + availability.occupied;
        let incidents = cluster.members.iter().filter(|r| r.is_incident()).count();
        let (title, summary) = if stations == count {
            (
                format!("{count} stations"),
                Some(format!(
                    "{} available, {} occupied",
                    availability.available, availability.occupied
                )),
            )
        } else if incidents == count {
            (format!("{count} incidents"), None)
        } else {
            (format!("{count} records"), None)
        };
        Some(Self {
            key,
            count,
            title,
            summary,
            postal_codes: cluster.postal_codes(),
            bounds: cluster.bounds,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListRow {
    Record(RecordRow),
    Cluster(ClusterRow),
}

impl ListRow {
    /// Stable per-row identity used to wire clicks back to the controller.
    pub fn key(&self) -> RecordId {
        match self {
            ListRow::Record(r) => r.id,
            ListRow::Cluster(c) => c.key,
        }
    }

    /// Record rows select on click; cluster rows are informational.
    pub fn click_target(&self) -> Option<RecordId> {
        match self {
            ListRow::Record(r) => Some(r.id),
            ListRow::Cluster(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListModel {
    Empty { message: String },
    Rows { header: String, rows: Vec<ListRow> },
}

impl ListModel {
    /// Builds the list for one recompute.
    ///
    /// Clustered mode mirrors the map: one aggregate row per multi-record
    /// cluster plus a row per singleton. Individual mode lists every record in
    /// `active`, whether or not it is inside the map bounds.
    pub fn build(
        mode: DisplayMode,
        units: &[RenderUnit],
        active: &[Record],
        selected: Option<RecordId>,
    ) -> Self {
        match mode {
            DisplayMode::Clustered => Self::clustered(units, selected),
            DisplayMode::Individual => Self::individual(active, selected),
        }
    }

    fn clustered(units: &[RenderUnit], selected: Option<RecordId>) -> Self {
        if units.is_empty() {
            return ListModel::Empty {
                message: NO_RECORDS_IN_VIEW.to_string(),
            };
        }

        let mut rows = Vec::with_capacity(units.len());
        let mut groups = 0usize;
        let mut singles = 0usize;
        for unit in units {
            match unit.records() {
                [record] => {
                    singles += 1;
                    rows.push(ListRow::Record(RecordRow::from_record(record, selected)));
                }
                _ => {
                    let RenderUnit::Cluster(c) = unit else {
                        continue;
                    };
                    let Some(row) = ClusterRow::from_cluster(c) else {
                        continue;
                    };
                    groups += 1;
                    rows.push(ListRow::Cluster(row));
                }
            }
        }

        ListModel::Rows {
            header: format!("Showing {groups} clusters and {singles} individual records"),
            rows,
        }
    }

    fn individual(active: &[Record], selected: Option<RecordId>) -> Self {
        if active.is_empty() {
            return ListModel::Empty {
                message: NO_RECORDS_MATCH.to_string(),
            };
        }
        ListModel::Rows {
            header: format!("Showing all {} individual records", active.len()),
            rows: active
                .iter()
                .map(|r| ListRow::Record(RecordRow::from_record(r, selected)))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        match self {
            ListModel::Empty { .. } => &[],
            ListModel::Rows { rows, .. } => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListModel::Empty { .. })
    }

    pub fn has_cluster_rows(&self) -> bool {
        self.rows().iter().any(|r| matches!(r, ListRow::Cluster(_)))
    }

    pub fn selected_row(&self) -> Option<&RecordRow> {
        self.rows().iter().find_map(|r| match r {
            ListRow::Record(row) if row.selected => Some(row),
            _ => None,
        })
    }
}
