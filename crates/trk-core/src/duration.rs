//! Whole-second duration formatting.

/// Formats a whole-second total as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits but never truncated, so totals past
/// 100 hours render as e.g. `100:00:00`. End-before-start durations cannot
/// occur under normal operation; values below zero clamp to `00:00:00`.
pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_seconds(0), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_seconds(3661), "01:01:01");
        assert_eq!(format_seconds(59), "00:00:59");
        assert_eq!(format_seconds(3600), "01:00:00");
        assert_eq!(format_seconds(86399), "23:59:59");
    }

    #[test]
    fn hours_are_not_truncated_past_two_digits() {
        assert_eq!(format_seconds(360_000), "100:00:00");
        assert_eq!(format_seconds(363_661), "101:01:01");
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(format_seconds(-1), "00:00:00");
        assert_eq!(format_seconds(-3600), "00:00:00");
    }

    #[test]
    fn round_trips_through_parsing() {
        fn parse(formatted: &str) -> i64 {
            let mut parts = formatted.rsplit(':');
            let secs: i64 = parts.next().unwrap().parse().unwrap();
            let minutes: i64 = parts.next().unwrap().parse().unwrap();
            let hours: i64 = parts.next().unwrap().parse().unwrap();
            hours * 3600 + minutes * 60 + secs
        }

        for seconds in [0, 1, 59, 60, 3599, 3600, 3661, 86399, 86400, 360_000] {
            assert_eq!(parse(&format_seconds(seconds)), seconds);
        }
    }
}
