use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use formats::timestamp::format_timestamp;
use foundation::RecordId;
use foundation::math::LatLng;
use foundation::time::{Time, TimeSpan};
use scene::collection::RecordSet;
use scene::filter::CategoryFilter;
use view::config::ViewConfig;
use view::controller::ViewController;

use crate::headless::{CollectingList, HeadlessMap};

pub type HeadlessController = ViewController<HeadlessMap, CollectingList>;

/// Viewport and view choices for one headless run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub center: LatLng,
    pub zoom: i32,
    pub viewport_px: [f64; 2],
    pub individual: bool,
    pub category: Option<String>,
    pub since_days: Option<u32>,
    /// Reference time for `since_days`; the wall clock when `None`.
    pub now: Option<Time>,
    pub select: Option<u64>,
    pub config: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(center: LatLng, zoom: i32, viewport_px: [f64; 2]) -> Self {
        Self {
            center,
            zoom,
            viewport_px,
            individual: false,
            category: None,
            since_days: None,
            now: None,
            select: None,
            config: None,
        }
    }
}

/// Reads a JSON view config; `None` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ViewConfig, String> {
    let Some(path) = path else {
        return Ok(ViewConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    ViewConfig::from_json_str(&raw).map_err(|e| format!("config {}: {e}", path.display()))
}

/// Builds a controller over `records` and applies the options in order:
/// view mode, category, date window, then selection.
///
/// A `select` id outside the active set is logged and leaves nothing selected.
pub fn build_controller(
    records: RecordSet,
    options: &RunOptions,
) -> Result<HeadlessController, String> {
    let config = load_config(options.config.as_deref())?;
    let map = HeadlessMap::new(
        options.center,
        options.zoom,
        options.viewport_px,
        config.cluster,
    );
    let mut controller = ViewController::new(map, CollectingList::default(), records, config);

    if options.individual {
        controller.set_force_individual_view(true);
    }
    if let Some(category) = &options.category {
        controller.set_filter(CategoryFilter::parse(category));
    }
    if let Some(days) = options.since_days {
        let now = options
            .now
            .unwrap_or_else(|| Time(Utc::now().timestamp() as f64));
        tracing::info!(
            "keeping records from the {days} days up to {}",
            format_timestamp(now).unwrap_or_else(|| format!("{}s", now.0))
        );
        controller.set_date_filter(Some(TimeSpan::trailing_days(now, days)));
    }
    if let Some(id) = options.select {
        controller.select_record(RecordId(id));
        if controller.selected().is_none() {
            tracing::warn!("record {id} is not in the active set; nothing selected");
        }
    }
    Ok(controller)
}
