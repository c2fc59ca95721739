use foundation::bounds::GeoBounds;
use layers::cluster::{ClusterConfig, DisplayMode};
use scene::filter::RecordFilter;
use scene::selection::Selection;

/// Everything the controller needs to derive one frame.
///
/// Owned and mutated only by `ViewController`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: i32,
    pub bounds: GeoBounds,
    pub force_individual: bool,
    pub filter: RecordFilter,
    pub selection: Selection,
}

impl ViewState {
    pub fn new(zoom: i32, bounds: GeoBounds) -> Self {
        Self {
            zoom,
            bounds,
            force_individual: false,
            filter: RecordFilter::default(),
            selection: Selection::new(),
        }
    }

    pub fn display_mode(&self, config: &ClusterConfig) -> DisplayMode {
        DisplayMode::for_view(self.zoom, self.force_individual, config)
    }
}
