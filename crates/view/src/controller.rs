use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::math::LatLng;
use foundation::time::{Time, TimeSpan};
use layers::cluster::{ClickAction, ClusterSnapshot, ClusterTarget, DisplayMode, RenderUnit};
use runtime::event_bus::EventQueue;
use runtime::metrics::Metrics;
use scene::collection::RecordSet;
use scene::filter::{CategoryFilter, within_bounds};
use serde::Serialize;

use crate::config::ViewConfig;
use crate::event::ViewEvent;
use crate::list::ListModel;
use crate::state::ViewState;
use crate::surface::{ListSurface, MapSurface, zoom_label};

/// One derived frame: what the map and the list were last told to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    pub zoom: i32,
    pub mode: DisplayMode,
    pub units: Vec<RenderUnit>,
    pub list: ListModel,
    pub selected: Option<RecordId>,
    pub active_count: usize,
    pub visible_count: usize,
    pub group_count: usize,
}

fn derive_frame<M: MapSurface>(
    map: &M,
    records: &RecordSet,
    state: &mut ViewState,
    config: &ViewConfig,
) -> ViewFrame {
    let active = state.filter.apply(records);
    state.selection.resolve(&active);

    let visible = within_bounds(&active, &state.bounds);
    let project = |p: LatLng| map.project(p);
    let snapshot = ClusterSnapshot::build(
        &visible,
        state.zoom,
        state.force_individual,
        &project,
        &config.cluster,
    );

    let mode = state.display_mode(&config.cluster);
    let selected = state.selection.id();
    let list = ListModel::build(mode, &snapshot.units, &active, selected);
    let group_count = snapshot.group_count();

    ViewFrame {
        zoom: state.zoom,
        mode,
        units: snapshot.units,
        list,
        selected,
        active_count: active.len(),
        visible_count: visible.len(),
        group_count,
    }
}

/// Owns the view state and keeps the map and the list in step.
///
/// Every public operation runs to completion: it updates the state, derives a
/// fresh frame and pushes it to both surfaces before returning. Operations
/// that only ask the map to move (`fit_bounds`, `set_view`) do not recompute;
/// the map reports the new viewport through `on_viewport_changed`.
pub struct ViewController<M, L> {
    config: ViewConfig,
    records: RecordSet,
    state: ViewState,
    map: M,
    list: L,
    frame: ViewFrame,
    metrics: Metrics,
}

impl<M: MapSurface, L: ListSurface> ViewController<M, L> {
    /// Reads the initial viewport from `map` and publishes the first frame.
    pub fn new(map: M, list: L, records: RecordSet, config: ViewConfig) -> Self {
        let mut state = ViewState::new(map.current_zoom(), map.current_bounds());
        let frame = derive_frame(&map, &records, &mut state, &config);
        let mut controller = Self {
            config,
            records,
            state,
            map,
            list,
            frame,
            metrics: Metrics::new(),
        };
        controller.publish();
        controller
    }

    pub fn set_filter(&mut self, category: CategoryFilter) {
        self.metrics.inc("filter_changes");
        self.state.filter.category = category;
        self.recompute();
    }

    /// `None` removes the date restriction.
    pub fn set_date_filter(&mut self, range: Option<TimeSpan>) {
        self.metrics.inc("filter_changes");
        self.state.filter.date = range;
        self.recompute();
    }

    pub fn set_force_individual_view(&mut self, force: bool) {
        self.state.force_individual = force;
        self.recompute();
    }

    pub fn on_viewport_changed(&mut self, zoom: i32, bounds: GeoBounds) {
        self.metrics.inc("viewport_changes");
        self.state.zoom = zoom;
        self.state.bounds = bounds;
        self.recompute();
    }

    /// Re-reads zoom and bounds from the map.
    pub fn sync_viewport(&mut self) {
        let zoom = self.map.current_zoom();
        let bounds = self.map.current_bounds();
        self.on_viewport_changed(zoom, bounds);
    }

    /// Selects `id`. An id outside the active collection leaves nothing selected.
    pub fn select_record(&mut self, id: RecordId) {
        self.metrics.inc("selections");
        self.state.selection.select(id);
        self.recompute();
    }

    pub fn clear_selection(&mut self) {
        if self.state.selection.clear() {
            self.recompute();
        }
    }

    /// Selects the row's record and centres the map on it, zooming in to at
    /// least `focus_zoom`.
    pub fn on_list_row_clicked(&mut self, id: RecordId) {
        self.select_record(id);
        if !self.state.selection.is_selected(id) {
            return;
        }
        let Some(position) = self.records.get(id).map(|r| r.position) else {
            return;
        };
        let zoom = self.state.zoom.max(self.config.focus_zoom);
        self.map.set_view(position, zoom);
    }

    pub fn on_cluster_clicked(&mut self, target: &ClusterTarget) {
        match target.click_action(self.config.cluster.fit_padding) {
            Some(ClickAction::Select(id)) => self.select_record(id),
            Some(ClickAction::FitBounds(bounds)) => self.map.fit_bounds(bounds),
            None => {}
        }
    }

    /// Swaps in a regenerated snapshot. The selection is kept by id.
    pub fn replace_records(&mut self, records: RecordSet) {
        tracing::debug!(
            "replacing {} records with {}",
            self.records.len(),
            records.len()
        );
        self.records = records;
        self.recompute();
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        tracing::trace!("dispatch {}", event.name());
        match event {
            ViewEvent::ViewportChanged { zoom, bounds } => self.on_viewport_changed(zoom, bounds),
            ViewEvent::FilterClicked(category) => self.set_filter(category),
            ViewEvent::DateFilterChanged(range) => self.set_date_filter(range),
            ViewEvent::ViewModeToggled { force_individual } => {
                self.set_force_individual_view(force_individual)
            }
            ViewEvent::RecordClicked(id) => self.select_record(id),
            ViewEvent::ClusterClicked(target) => self.on_cluster_clicked(&target),
            ViewEvent::ListRowClicked(id) => self.on_list_row_clicked(id),
        }
    }

    /// Dispatches every event `queue` releases at `now`. Returns how many ran.
    pub fn drain(&mut self, queue: &mut EventQueue<ViewEvent>, now: Time) -> usize {
        let ready = queue.poll(now);
        let count = ready.len();
        for queued in ready {
            self.dispatch(queued.event);
        }
        count
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn frame(&self) -> &ViewFrame {
        &self.frame
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.state.selection.id()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    fn recompute(&mut self) {
        self.frame = derive_frame(&self.map, &self.records, &mut self.state, &self.config);
        self.publish();
    }

    fn publish(&mut self) {
        let frame = &self.frame;
        self.map.render(&frame.units, frame.selected);
        self.map.set_zoom_label(&zoom_label(frame.zoom));
        self.list.render_list(&frame.list);

        self.metrics.inc("recompute");
        self.metrics.set_gauge("units", frame.units.len() as i64);
        self.metrics.set_gauge("clusters", frame.group_count as i64);
        self.metrics.observe("active_records", frame.active_count);
        self.metrics.observe("visible_records", frame.visible_count);

        tracing::debug!(
            "zoom {} ({:?}): {} units from {} visible of {} active records",
            frame.zoom,
            frame.mode,
            frame.units.len(),
            frame.visible_count,
            frame.active_count
        );
    }
}
