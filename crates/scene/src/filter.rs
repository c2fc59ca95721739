use foundation::bounds::GeoBounds;
use foundation::time::{Time, TimeSpan};
use serde::{Deserialize, Serialize};

use crate::collection::RecordSet;
use crate::record::Record;

/// Category predicate; `All` lets every record through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) or an empty string selects every category.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn allows(&self, record: &Record) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => record.category.eq_ignore_ascii_case(c),
        }
    }
}

fn time_allows(reported: Option<Time>, span: Option<TimeSpan>) -> bool {
    let Some(span) = span else {
        return true;
    };
    let Some(reported) = reported else {
        // Records without a timestamp are not time-scoped.
        return true;
    };
    span.contains(reported)
}

/// Category then date-range predicate shared by the map and the list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    pub category: CategoryFilter,
    pub date: Option<TimeSpan>,
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        self.category.allows(record) && time_allows(record.reported_at(), self.date)
    }

    /// Active collection: every matching record, in snapshot order.
    pub fn apply(&self, set: &RecordSet) -> Vec<Record> {
        set.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Records whose coordinate lies inside `bounds`, order preserved.
pub fn within_bounds(records: &[Record], bounds: &GeoBounds) -> Vec<Record> {
    records
        .iter()
        .filter(|r| bounds.contains(r.position))
        .cloned()
        .collect()
}
