use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::math::{LatLng, Projector, ScreenPoint, WebMercator};
use layers::cluster::{ClusterConfig, RenderUnit};
use layers::symbology::{MarkerSymbol, symbolize};
use serde::Serialize;
use view::list::ListModel;
use view::surface::{ListSurface, MapSurface};

pub const MAX_ZOOM: i32 = 19;

/// Viewport change the controller asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum MapRequest {
    FitBounds { bounds: GeoBounds },
    SetView { center: LatLng, zoom: i32 },
}

/// Web Mercator map with a fixed pixel viewport and no display.
///
/// Viewport requests are applied immediately; callers follow them with
/// `ViewController::sync_viewport` the way a real map emits a move event.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    viewport_px: [f64; 2],
    center: LatLng,
    projection: WebMercator,
    config: ClusterConfig,
    markers: Vec<MarkerSymbol>,
    label: String,
    requests: Vec<MapRequest>,
}

impl HeadlessMap {
    pub fn new(center: LatLng, zoom: i32, viewport_px: [f64; 2], config: ClusterConfig) -> Self {
        let zoom = zoom.clamp(0, MAX_ZOOM);
        Self {
            viewport_px,
            center,
            projection: WebMercator::centered(center, zoom, viewport_px),
            config,
            markers: Vec::new(),
            label: String::new(),
            requests: Vec::new(),
        }
    }

    pub fn look_at(&mut self, center: LatLng, zoom: i32) {
        let zoom = zoom.clamp(0, MAX_ZOOM);
        self.center = center;
        self.projection = WebMercator::centered(center, zoom, self.viewport_px);
    }

    /// Highest zoom whose viewport, centred on `bounds`, still shows all of it.
    pub fn zoom_to_fit(&self, bounds: &GeoBounds) -> i32 {
        let nw = LatLng::new(bounds.max_lat, bounds.min_lng);
        let se = LatLng::new(bounds.min_lat, bounds.max_lng);
        (0..=MAX_ZOOM)
            .rev()
            .find(|&zoom| {
                let view = WebMercator::centered(bounds.center(), zoom, self.viewport_px)
                    .visible_bounds(self.viewport_px);
                view.contains(nw) && view.contains(se)
            })
            .unwrap_or(0)
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn markers(&self) -> &[MarkerSymbol] {
        &self.markers
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn requests(&self) -> &[MapRequest] {
        &self.requests
    }
}

impl MapSurface for HeadlessMap {
    fn project(&self, position: LatLng) -> ScreenPoint {
        self.projection.project(position)
    }

    fn current_zoom(&self) -> i32 {
        self.projection.zoom
    }

    fn current_bounds(&self) -> GeoBounds {
        self.projection.visible_bounds(self.viewport_px)
    }

    fn render(&mut self, units: &[RenderUnit], selected: Option<RecordId>) {
        self.markers = symbolize(units, selected, &self.config);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        let zoom = self.zoom_to_fit(&bounds);
        tracing::debug!("fit {bounds:?} at zoom {zoom}");
        self.requests.push(MapRequest::FitBounds { bounds });
        self.look_at(bounds.center(), zoom);
    }

    fn set_view(&mut self, center: LatLng, zoom: i32) {
        self.requests.push(MapRequest::SetView { center, zoom });
        self.look_at(center, zoom);
    }

    fn set_zoom_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}

/// Keeps the most recent list model.
#[derive(Debug, Clone, Default)]
pub struct CollectingList {
    latest: Option<ListModel>,
    renders: usize,
}

impl CollectingList {
    pub fn latest(&self) -> Option<&ListModel> {
        self.latest.as_ref()
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl ListSurface for CollectingList {
    fn render_list(&mut self, model: &ListModel) {
        self.latest = Some(model.clone());
        self.renders += 1;
    }
}
