use foundation::RecordId;
use foundation::bounds::GeoBounds;
use foundation::time::TimeSpan;
use layers::cluster::ClusterTarget;
use runtime::event_bus::Supersede;
use scene::filter::CategoryFilter;

/// Inputs the controller reacts to, one variant per UI gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ViewportChanged { zoom: i32, bounds: GeoBounds },
    FilterClicked(CategoryFilter),
    DateFilterChanged(Option<TimeSpan>),
    ViewModeToggled { force_individual: bool },
    RecordClicked(RecordId),
    ClusterClicked(ClusterTarget),
    ListRowClicked(RecordId),
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::ViewportChanged { .. } => "viewport_changed",
            ViewEvent::FilterClicked(_) => "filter_clicked",
            ViewEvent::DateFilterChanged(_) => "date_filter_changed",
            ViewEvent::ViewModeToggled { .. } => "view_mode_toggled",
            ViewEvent::RecordClicked(_) => "record_clicked",
            ViewEvent::ClusterClicked(_) => "cluster_clicked",
            ViewEvent::ListRowClicked(_) => "list_row_clicked",
        }
    }
}

impl Supersede for ViewEvent {
    fn supersedes_pending(&self) -> bool {
        matches!(self, ViewEvent::ViewportChanged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::ViewEvent;
    use foundation::RecordId;
    use foundation::bounds::GeoBounds;
    use runtime::event_bus::Supersede;

    #[test]
    fn only_viewport_changes_coalesce() {
        let moved = ViewEvent::ViewportChanged {
            zoom: 4,
            bounds: GeoBounds::world(),
        };
        assert!(moved.supersedes_pending());
        assert!(!ViewEvent::RecordClicked(RecordId(1)).supersedes_pending());
        let toggled = ViewEvent::ViewModeToggled {
            force_individual: true,
        };
        assert!(!toggled.supersedes_pending());
    }
}
