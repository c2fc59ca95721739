use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::math::LatLng;
use layers::cluster::{DisplayMode, RenderUnit};
use layers::symbology::MarkerSymbol;
use serde::Serialize;
use view::controller::ViewController;
use view::list::ListModel;
use view::surface::MapSurface;

use crate::headless::{CollectingList, HeadlessMap};

/// JSON document printed by `geocluster`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub dataset_hash: &'a str,
    pub zoom: i32,
    pub center: LatLng,
    pub bounds: GeoBounds,
    pub mode: DisplayMode,
    pub selected: Option<RecordId>,
    pub active_records: usize,
    pub visible_records: usize,
    pub recomputes: u64,
    pub units: &'a [RenderUnit],
    pub markers: &'a [MarkerSymbol],
    pub list: &'a ListModel,
}

impl<'a> Report<'a> {
    pub fn new(
        controller: &'a ViewController<HeadlessMap, CollectingList>,
        dataset_hash: &'a str,
    ) -> Self {
        let frame = controller.frame();
        let map = controller.map();
        Self {
            dataset_hash,
            zoom: frame.zoom,
            center: map.center(),
            bounds: map.current_bounds(),
            mode: frame.mode,
            selected: frame.selected,
            active_records: frame.active_count,
            visible_records: frame.visible_count,
            recomputes: controller.metrics().counter("recompute"),
            units: &frame.units,
            markers: map.markers(),
            list: &frame.list,
        }
    }
}
