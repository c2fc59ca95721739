use layers::cluster::ClusterConfig;
use runtime::event_bus::DEFAULT_SETTLE_S;
use serde::{Deserialize, Serialize};

/// Zoom the map is raised to when a list row is focused.
pub const DEFAULT_FOCUS_ZOOM: i32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub cluster: ClusterConfig,
    pub focus_zoom: i32,
    /// Quiet period for coalesced viewport events, in seconds.
    pub settle_s: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cluster: ClusterConfig::default(),
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            settle_s: DEFAULT_SETTLE_S,
        }
    }
}

impl ViewConfig {
    /// Missing keys fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
