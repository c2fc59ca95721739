use foundation::RecordId;
use foundation::math::LatLng;
use scene::record::StationStatus;
use serde::{Deserialize, Serialize};

use crate::cluster::{ClickAction, ClusterConfig, RenderUnit};

pub const RECORD_MARKER_PX: f64 = 12.0;
pub const CLUSTER_MARKER_MIN_PX: f64 = 30.0;
pub const CLUSTER_MARKER_MAX_PX: f64 = 50.0;

/// Cluster marker diameter grows with membership, clamped to a readable range.
pub fn cluster_marker_px(count: usize) -> f64 {
    (20.0 + 2.0 * count as f64).clamp(CLUSTER_MARKER_MIN_PX, CLUSTER_MARKER_MAX_PX)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    Default,
    Occupied,
    /// Wins over every other record style.
    Selected,
    Cluster,
}

/// Everything a map widget needs to draw one render unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub position: LatLng,
    pub diameter_px: f64,
    pub style: MarkerStyle,
    /// Member count shown on cluster markers.
    pub count: Option<usize>,
    pub on_click: Option<ClickAction>,
}

pub fn symbolize_unit(
    unit: &RenderUnit,
    selected: Option<RecordId>,
    config: &ClusterConfig,
) -> MarkerSymbol {
    let on_click = unit.click_action(config.fit_padding);
    match unit {
        RenderUnit::Individual { record } => {
            let style = if selected == Some(record.id) {
                MarkerStyle::Selected
            } else if record.station_status() == Some(StationStatus::Occupied) {
                MarkerStyle::Occupied
            } else {
                MarkerStyle::Default
            };
            MarkerSymbol {
                position: record.position,
                diameter_px: RECORD_MARKER_PX,
                style,
                count: None,
                on_click,
            }
        }
        RenderUnit::Cluster(c) => MarkerSymbol {
            position: c.centroid,
            diameter_px: cluster_marker_px(c.len()),
            style: MarkerStyle::Cluster,
            count: Some(c.len()),
            on_click,
        },
    }
}

pub fn symbolize(
    units: &[RenderUnit],
    selected: Option<RecordId>,
    config: &ClusterConfig,
) -> Vec<MarkerSymbol> {
    units
        .iter()
        .map(|u| symbolize_unit(u, selected, config))
        .collect()
}
