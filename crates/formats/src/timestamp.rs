use chrono::{DateTime, NaiveDate, SecondsFormat};
use foundation::time::Time;

/// Parses an ISO-8601 timestamp (`2024-03-01T12:00:00Z`, with offset or
/// fractional seconds) or a bare `YYYY-MM-DD` date taken as UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<Time> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let secs = dt.timestamp() as f64;
        let frac = f64::from(dt.timestamp_subsec_nanos()) / 1e9;
        return Some(Time(secs + frac));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(Time(midnight.timestamp() as f64))
}

/// RFC 3339 in UTC with millisecond precision; `None` outside chrono's range.
pub fn format_timestamp(t: Time) -> Option<String> {
    if !t.0.is_finite() {
        return None;
    }
    let secs = t.0.floor();
    let nanos = ((t.0 - secs) * 1e9).round().min(999_999_999.0) as u32;
    let dt = DateTime::from_timestamp(secs as i64, nanos)?;
    Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp};
    use foundation::time::Time;

    #[test]
    fn parses_utc_and_offsets() {
        assert_eq!(
            parse_timestamp("2024-03-01T12:00:00Z"),
            Some(Time(1_709_294_400.0))
        );
        assert_eq!(
            parse_timestamp("2024-03-01T07:00:00-05:00"),
            Some(Time(1_709_294_400.0))
        );
        assert_eq!(
            parse_timestamp(" 2024-03-01T12:00:00.500Z "),
            Some(Time(1_709_294_400.5))
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(parse_timestamp("2024-03-01"), Some(Time(1_709_251_200.0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }

    #[test]
    fn formats_as_rfc3339() {
        assert_eq!(
            format_timestamp(Time(1_709_289_000.0)).as_deref(),
            Some("2024-03-01T10:30:00.000Z")
        );
        assert_eq!(format_timestamp(Time(f64::NAN)), None);
    }
}
