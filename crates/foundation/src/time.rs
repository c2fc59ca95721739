use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(pub f64);

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Closed time interval `[start, end]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// The `days` days leading up to and including `now`.
    pub fn trailing_days(now: Time, days: u32) -> Self {
        Self {
            start: Time(now.0 - f64::from(days) * SECONDS_PER_DAY),
            end: now,
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    pub fn contains(&self, t: Time) -> bool {
        t.0 >= self.start.0 && t.0 <= self.end.0
    }
}
