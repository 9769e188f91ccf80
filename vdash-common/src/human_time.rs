//! Human-readable duration formatting for the stats views

/// Format a duration in seconds for display.
///
/// Format selection by magnitude:
/// - `< 60s` → `X.Xs`
/// - `< 1h`  → `Mm SSs`
/// - `>= 1h` → `Hh Mm`
///
/// # Examples
///
/// ```
/// use vdash_common::human_time::format_duration;
///
/// assert_eq!(format_duration(45.3), "45.3s");
/// assert_eq!(format_duration(200.0), "3m 20s");
/// assert_eq!(format_duration(3900.0), "1h 5m");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);

    if seconds < 60.0 {
        return format!("{seconds:.1}s");
    }
    if seconds < 3600.0 {
        let minutes = (seconds / 60.0).floor() as i64;
        let secs = (seconds % 60.0).round() as i64;
        return format!("{minutes}m {secs}s");
    }
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as i64;
    format!("{hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_durations_keep_tenths() {
        assert_eq!(format_duration(0.0), "0.0s");
        assert_eq!(format_duration(5.25), "5.2s");
        assert_eq!(format_duration(59.94), "59.9s");
    }

    #[test]
    fn minute_range_splits_components() {
        assert_eq!(format_duration(60.0), "1m 0s");
        assert_eq!(format_duration(200.0), "3m 20s");
        assert_eq!(format_duration(3599.0), "59m 59s");
    }

    #[test]
    fn hour_range_drops_seconds() {
        assert_eq!(format_duration(3600.0), "1h 0m");
        assert_eq!(format_duration(3900.0), "1h 5m");
        assert_eq!(format_duration(7261.0), "2h 1m");
    }

    #[test]
    fn negative_is_clamped_to_zero() {
        assert_eq!(format_duration(-12.0), "0.0s");
    }
}
