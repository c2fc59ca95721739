use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::math::{LatLng, ScreenPoint};
use layers::cluster::RenderUnit;

use crate::list::ListModel;

/// The map widget as the controller sees it.
///
/// `project` must reflect the map's current zoom and pan.
pub trait MapSurface {
    fn project(&self, position: LatLng) -> ScreenPoint;
    fn current_zoom(&self) -> i32;
    fn current_bounds(&self) -> GeoBounds;
    /// Replaces every marker on the map.
    fn render(&mut self, units: &[RenderUnit], selected: Option<RecordId>);
    /// Requests a viewport change; the map reports it back as a viewport event.
    fn fit_bounds(&mut self, bounds: GeoBounds);
    fn set_view(&mut self, center: LatLng, zoom: i32);
    fn set_zoom_label(&mut self, _label: &str) {}
}

pub trait ListSurface {
    fn render_list(&mut self, model: &ListModel);
}

pub fn zoom_label(zoom: i32) -> String {
    format!("Zoom: {zoom}")
}
