//! Greedy screen-space clustering of records for one viewport.
//!
//! The grouping is seed-order dependent and not transitive: a record joins the
//! first earlier seed within `cluster_radius_px` of it, even when it is far
//! from that cluster's other members. Reordering the input can change the
//! result. This matches the established marker behavior and is kept as is.

use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::math::{LatLng, Projector, ScreenPoint};
use scene::record::{Record, StationStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Zoom at and above which every record is drawn individually.
    pub min_zoom_for_individual: i32,
    pub cluster_radius_px: f64,
    pub max_cluster_size: usize,
    /// Fraction each side of a cluster's bounds grows by when zooming into it.
    pub fit_padding: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_zoom_for_individual: 13,
            cluster_radius_px: 80.0,
            max_cluster_size: 50,
            fit_padding: 0.1,
        }
    }
}

/// Whether a view groups records or draws them one by one.
///
/// This is the single zoom/override rule shared by the map markers and the
/// list model; both must call `for_view` rather than re-deriving it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Clustered,
    Individual,
}

impl DisplayMode {
    pub fn for_view(zoom: i32, force_individual: bool, config: &ClusterConfig) -> Self {
        if !force_individual && zoom < config.min_zoom_for_individual {
            DisplayMode::Clustered
        } else {
            DisplayMode::Individual
        }
    }

    pub fn is_clustered(self) -> bool {
        self == DisplayMode::Clustered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Non-empty; the first member is the seed.
    pub members: Vec<Record>,
    pub centroid: LatLng,
    pub bounds: GeoBounds,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Availability {
    pub available: usize,
    pub occupied: usize,
}

impl Cluster {
    fn seeded(seed: Record) -> Self {
        Self {
            centroid: seed.position,
            bounds: GeoBounds::from_point(seed.position),
            members: vec![seed],
        }
    }

    fn absorb(&mut self, record: Record) {
        self.bounds.extend(record.position);
        self.members.push(record);
    }

    fn finish(&mut self) {
        if self.members.len() < 2 {
            return;
        }
        let n = self.members.len() as f64;
        let sum_lat: f64 = self.members.iter().map(|r| r.position.lat).sum();
        let sum_lng: f64 = self.members.iter().map(|r| r.position.lng).sum();
        self.centroid = LatLng::new(sum_lat / n, sum_lng / n);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn seed(&self) -> Option<&Record> {
        self.members.first()
    }

    pub fn member_ids(&self) -> Vec<RecordId> {
        self.members.iter().map(|r| r.id).collect()
    }

    /// Station port status counts; incident members count toward neither.
    pub fn availability(&self) -> Availability {
        let mut out = Availability::default();
        for r in &self.members {
            match r.station_status() {
                Some(StationStatus::Available) => out.available += 1,
                Some(StationStatus::Occupied) => out.occupied += 1,
                None => {}
            }
        }
        out
    }

    /// Distinct 5-digit postal codes found in member addresses, first-seen order.
    pub fn postal_codes(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for r in &self.members {
            let Some(code) = postal_code(&r.address) else {
                continue;
            };
            if !out.iter().any(|c| c == code) {
                out.push(code.to_string());
            }
        }
        out
    }

    pub fn target(&self) -> ClusterTarget {
        ClusterTarget {
            members: self.member_ids(),
            bounds: self.bounds,
        }
    }
}

/// First standalone run of exactly five ASCII digits.
fn postal_code(address: &str) -> Option<&str> {
    address
        .split(|c: char| !c.is_ascii_alphanumeric())
        .find(|tok| tok.len() == 5 && tok.bytes().all(|b| b.is_ascii_digit()))
}

/// What a click on a marker asks for.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    Select(RecordId),
    FitBounds(GeoBounds),
}

/// The part of a cluster a click handler needs once markers are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterTarget {
    pub members: Vec<RecordId>,
    pub bounds: GeoBounds,
}

impl ClusterTarget {
    /// A one-member cluster selects its record; larger ones zoom to their bounds.
    pub fn click_action(&self, padding: f64) -> Option<ClickAction> {
        match self.members.as_slice() {
            [] => None,
            [only] => Some(ClickAction::Select(*only)),
            _ => Some(ClickAction::FitBounds(self.bounds.pad(padding))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderUnit {
    Individual { record: Record },
    Cluster(Cluster),
}

impl RenderUnit {
    /// Where the marker goes: the record itself or the cluster centroid.
    pub fn position(&self) -> LatLng {
        match self {
            RenderUnit::Individual { record } => record.position,
            RenderUnit::Cluster(c) => c.centroid,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RenderUnit::Individual { .. } => 1,
            RenderUnit::Cluster(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, RenderUnit::Cluster(_))
    }

    pub fn records(&self) -> &[Record] {
        match self {
            RenderUnit::Individual { record } => std::slice::from_ref(record),
            RenderUnit::Cluster(c) => &c.members,
        }
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records().iter().any(|r| r.id == id)
    }

    pub fn click_action(&self, padding: f64) -> Option<ClickAction> {
        match self {
            RenderUnit::Individual { record } => Some(ClickAction::Select(record.id)),
            RenderUnit::Cluster(c) => c.target().click_action(padding),
        }
    }
}

/// Partitions `records` into render units for one viewport.
///
/// In individual mode every record becomes an `Individual`, order preserved.
/// Otherwise records are grouped greedily in input order: each unclaimed record
/// seeds a cluster that absorbs later unclaimed records within
/// `cluster_radius_px` of the seed, up to `max_cluster_size` members.
///
/// Ordering contract:
/// - Units appear in the order their seeds appear in `records`.
/// - Members appear seed first, then in input order.
///
/// O(n^2) in the visible record count; call once per view change.
pub fn cluster<P>(
    records: &[Record],
    zoom: i32,
    force_individual: bool,
    projector: &P,
    config: &ClusterConfig,
) -> Vec<RenderUnit>
where
    P: Projector + ?Sized,
{
    if !DisplayMode::for_view(zoom, force_individual, config).is_clustered() {
        return records
            .iter()
            .map(|r| RenderUnit::Individual { record: r.clone() })
            .collect();
    }

    // Projection is fixed for the call, so each record is projected once.
    let screen: Vec<ScreenPoint> = records
        .iter()
        .map(|r| projector.project(r.position))
        .collect();
    let max_size = config.max_cluster_size.max(1);
    let mut claimed = vec![false; records.len()];
    let mut out = Vec::new();

    for (seed_index, seed) in records.iter().enumerate() {
        if claimed[seed_index] {
            continue;
        }
        claimed[seed_index] = true;

        let mut group = Cluster::seeded(seed.clone());
        for other_index in (seed_index + 1)..records.len() {
            if group.len() >= max_size {
                break;
            }
            if claimed[other_index] {
                continue;
            }
            let d = screen[seed_index].distance(screen[other_index]);
            if d <= config.cluster_radius_px {
                claimed[other_index] = true;
                group.absorb(records[other_index].clone());
            }
        }
        group.finish();
        out.push(RenderUnit::Cluster(group));
    }

    out
}

/// Render units plus the mode that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSnapshot {
    pub mode: DisplayMode,
    pub units: Vec<RenderUnit>,
}

impl ClusterSnapshot {
    pub fn build<P>(
        records: &[Record],
        zoom: i32,
        force_individual: bool,
        projector: &P,
        config: &ClusterConfig,
    ) -> Self
    where
        P: Projector + ?Sized,
    {
        Self {
            mode: DisplayMode::for_view(zoom, force_individual, config),
            units: cluster(records, zoom, force_individual, projector, config),
        }
    }

    /// Clusters with more than one member.
    pub fn group_count(&self) -> usize {
        self.units
            .iter()
            .filter(|u| u.is_cluster() && u.len() > 1)
            .count()
    }

    /// Units standing for exactly one record.
    pub fn single_count(&self) -> usize {
        self.units.iter().filter(|u| u.len() == 1).count()
    }

    pub fn record_count(&self) -> usize {
        self.units.iter().map(RenderUnit::len).sum()
    }
}
