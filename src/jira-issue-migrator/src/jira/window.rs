//! Created-date windows used to walk ticket history backwards.

use chrono::{Days, NaiveDate};
use std::fmt;

/// Days reached back by the final catch-all window.
pub const HISTORY_DAYS: u64 = 365 * 50;

/// An inclusive range of creation dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First creation date.
    pub start: NaiveDate,

    /// Last creation date.
    pub end: NaiveDate,
}

impl DateWindow {
    /// The most recent window. It ends one day after `today` so tickets
    /// created today are included.
    #[must_use]
    pub fn latest(today: NaiveDate, days: u32) -> Self {
        Self {
            start: days_before(today, u64::from(days)),
            end: today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }

    /// The window of `days` days ending where this one starts.
    #[must_use]
    pub fn previous(&self, days: u32) -> Self {
        Self {
            start: days_before(self.start, u64::from(days)),
            end: self.start,
        }
    }

    /// A window extending this one [`HISTORY_DAYS`] further back.
    #[must_use]
    pub fn history(&self) -> Self {
        Self {
            start: days_before(self.start, HISTORY_DAYS),
            end: self.end,
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn latest_window_includes_today() {
        let window = DateWindow::latest(date(2024, 3, 31), 90);

        assert_eq!(window.end, date(2024, 4, 1));
        assert_eq!(window.start, date(2024, 1, 1));
    }

    #[test]
    fn previous_window_is_contiguous() {
        let latest = DateWindow::latest(date(2024, 3, 31), 90);
        let previous = latest.previous(90);

        assert_eq!(previous.end, latest.start);
        assert_eq!(previous.start, date(2023, 10, 3));
    }

    #[test]
    fn history_window_reaches_fifty_years_back() {
        let window = DateWindow::latest(date(2024, 3, 31), 90).history();

        assert_eq!(window.end, date(2024, 4, 1));
        assert_eq!(window.start.year(), 1974);
    }

    #[test]
    fn can_display_window() {
        let window = DateWindow {
            start: date(2024, 1, 5),
            end: date(2024, 2, 9),
        };
        assert_eq!(window.to_string(), "2024-01-05 to 2024-02-09");
    }
}
