//! Timestamp conventions.
//!
//! All server clocks are UTC end-to-end; timestamps render as
//! `YYYY-MM-DD HH:MM:SS` in response payloads. Date-range query parameters
//! are whole calendar days, compared inclusively.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_optional(ts: &Option<DateTime<Utc>>) -> Option<String> {
    ts.as_ref().map(format_timestamp)
}

/// Midnight at the start of `date`, for inclusive `>= start_date` filters.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Midnight after `date`, for inclusive `<= end_date` filters expressed as
/// a strict `<` bound.
pub fn day_after(date: NaiveDate) -> DateTime<Utc> {
    day_start(date.succ_opt().unwrap_or(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamps_render_without_timezone_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 2, 4, 10, 38, 19).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-02-04 10:38:19");
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let start = day_start(date);
        let end = day_after(date);
        assert_eq!(start.to_rfc3339(), "2025-01-31T00:00:00+00:00");
        assert_eq!(end.day(), 1);
        let last_second = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap();
        assert!(last_second >= start && last_second < end);
    }
}
