use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use std::fmt;

/// Exchange timestamps are Moscow time (UTC+3)
pub const MARKET_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Number of 7-day windows covering the hourly history range
pub const HOURLY_WINDOW_COUNT: usize = 52;

/// Days per hourly fetch window; the broker caps the retrievable span at
/// fine-grained resolutions
pub const HOURLY_WINDOW_DAYS: i64 = 7;

/// Inclusive time range for one candle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleWindow {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

impl fmt::Display for CandleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

fn market_offset() -> FixedOffset {
    FixedOffset::east_opt(MARKET_UTC_OFFSET_SECS).expect("offset is in range")
}

fn history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 1).expect("valid date")
}

fn at(date: NaiveDate, time: NaiveTime) -> DateTime<FixedOffset> {
    date.and_time(time)
        .and_local_timezone(market_offset())
        .single()
        .expect("fixed offsets have no DST gaps")
}

/// The fixed one-year window fetched in a single daily-resolution request
pub fn daily_window() -> CandleWindow {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("valid time");
    CandleWindow {
        from: at(history_start(), midnight),
        to: at(NaiveDate::from_ymd_opt(2021, 5, 31).expect("valid date"), midnight),
    }
}

/// The 52 consecutive non-overlapping 7-day windows used at hourly resolution
///
/// Window `h` spans day `7h` 00:00:00 through day `7h + 6` 23:59:00, so
/// neighboring windows touch but never overlap.
pub fn hourly_windows() -> Vec<CandleWindow> {
    let start = history_start();
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("valid time");
    let last_minute = NaiveTime::from_hms_opt(23, 59, 0).expect("valid time");

    (0..HOURLY_WINDOW_COUNT as i64)
        .map(|h| CandleWindow {
            from: at(start + Duration::days(HOURLY_WINDOW_DAYS * h), midnight),
            to: at(
                start + Duration::days(HOURLY_WINDOW_DAYS * (h + 1) - 1),
                last_minute,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_window_bounds() {
        let window = daily_window();
        assert_eq!(window.from.to_rfc3339(), "2020-06-01T00:00:00+03:00");
        assert_eq!(window.to.to_rfc3339(), "2021-05-31T00:00:00+03:00");
    }

    #[test]
    fn test_hourly_window_count() {
        assert_eq!(hourly_windows().len(), 52);
    }

    #[test]
    fn test_hourly_windows_are_contiguous_and_non_overlapping() {
        let windows = hourly_windows();
        for pair in windows.windows(2) {
            // Next window starts exactly one minute after the previous ends
            assert_eq!(pair[1].from, pair[0].to + Duration::minutes(1));
            assert!(pair[0].to < pair[1].from);
        }
    }

    #[test]
    fn test_hourly_windows_span_364_days() {
        let windows = hourly_windows();
        let first = windows.first().unwrap();
        let last = windows.last().unwrap();

        assert_eq!(first.from.to_rfc3339(), "2020-06-01T00:00:00+03:00");
        // Day index 363 is the 364th covered day
        assert_eq!(
            last.to.date_naive(),
            history_start() + Duration::days(363)
        );
        assert_eq!(last.to.to_rfc3339(), "2021-05-30T23:59:00+03:00");
    }

    #[test]
    fn test_each_hourly_window_spans_seven_days() {
        for window in hourly_windows() {
            assert_eq!(
                window.to.date_naive() - window.from.date_naive(),
                Duration::days(HOURLY_WINDOW_DAYS - 1)
            );
        }
    }
}
