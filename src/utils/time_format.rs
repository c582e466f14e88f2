//! Time labels for the slider

use crate::core::TimeRange;
use chrono::DateTime;
use chrono_tz::Tz;

/// Render epoch seconds as `HH:MM:SS` local time in `tz`, daylight saving
/// included. Out-of-range inputs fall back to the raw number.
pub fn format_time_label(epoch_seconds: i64, tz: Tz) -> String {
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(utc) => utc.with_timezone(&tz).format("%H:%M:%S").to_string(),
        None => epoch_seconds.to_string(),
    }
}

/// Labelled ticks at both ends of the observed range
pub fn slider_ticks(range: TimeRange, tz: Tz) -> Vec<(i64, String)> {
    let mut ticks = vec![(range.min, format_time_label(range.min, tz))];
    if range.max != range.min {
        ticks.push((range.max, format_time_label(range.max, tz)));
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_in_utc() {
        assert_eq!(format_time_label(0, Tz::UTC), "00:00:00");
        assert_eq!(format_time_label(3_661, Tz::UTC), "01:01:01");
    }

    #[test]
    fn test_berlin_winter_and_summer_time() {
        // 2020-01-15T12:00:00Z, CET
        assert_eq!(format_time_label(1_579_089_600, Tz::Europe__Berlin), "13:00:00");
        // 2020-07-01T12:00:00Z, CEST
        assert_eq!(format_time_label(1_593_604_800, Tz::Europe__Berlin), "14:00:00");
    }

    #[test]
    fn test_out_of_range_timestamp_falls_back() {
        assert_eq!(format_time_label(i64::MAX, Tz::UTC), i64::MAX.to_string());
    }

    #[test]
    fn test_ticks_cover_range_endpoints() {
        let ticks = slider_ticks(TimeRange { min: 0, max: 60 }, Tz::UTC);
        assert_eq!(ticks, vec![(0, "00:00:00".to_string()), (60, "00:01:00".to_string())]);

        assert_eq!(slider_ticks(TimeRange { min: 5, max: 5 }, Tz::UTC).len(), 1);
    }
}
