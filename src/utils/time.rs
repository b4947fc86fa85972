use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, SubsecRound, TimeZone, Utc};

/// Source of "now" for every timestamp the core writes.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

/// Current UTC time at millisecond precision, so stored and returned values agree.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Inclusive UTC bounds of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// `[first day 00:00:00.000, last day 23:59:59.999]` of the month containing `at`.
    pub fn containing(at: DateTime<Utc>) -> Self {
        let first_day = NaiveDate::from_ymd_opt(at.year(), at.month(), 1)
            .unwrap_or_else(|| at.date_naive());
        let start = Utc.from_utc_datetime(&first_day.and_time(NaiveTime::MIN));
        let next_start = first_day
            .checked_add_months(Months::new(1))
            .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let end = next_start - Duration::milliseconds(1);
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn within(window: &MonthWindow, at: DateTime<Utc>) -> bool {
        window.start <= at && at <= window.end
    }

    #[test]
    fn window_covers_whole_month() {
        let window = MonthWindow::containing(utc(2024, 5, 17, 13, 45, 0));
        assert_eq!(window.start, utc(2024, 5, 1, 0, 0, 0));
        assert_eq!(
            window.end,
            utc(2024, 5, 31, 23, 59, 59) + Duration::milliseconds(999)
        );
        assert!(within(&window, window.start));
        assert!(within(&window, window.end));
        assert!(!within(&window, utc(2024, 6, 1, 0, 0, 0)));
        assert!(!within(&window, utc(2024, 4, 30, 23, 59, 59)));
    }

    #[test]
    fn window_handles_leap_february() {
        let window = MonthWindow::containing(utc(2024, 2, 10, 0, 0, 0));
        assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let window = MonthWindow::containing(utc(2023, 2, 10, 0, 0, 0));
        assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn window_rolls_over_december() {
        let window = MonthWindow::containing(utc(2023, 12, 31, 23, 59, 59));
        assert_eq!(window.start, utc(2023, 12, 1, 0, 0, 0));
        assert_eq!(
            window.end,
            utc(2023, 12, 31, 23, 59, 59) + Duration::milliseconds(999)
        );
        assert!(!within(&window, utc(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn system_clock_is_millisecond_precise() {
        let at = SystemClock.now();
        assert_eq!(at.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
