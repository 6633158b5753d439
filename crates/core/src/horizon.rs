//! The fixed forward planning window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A contiguous run of calendar days, `start` inclusive.
///
/// Both the planning horizon and the trailing actual-usage window are
/// expressed as horizons so day arithmetic stays in one place.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    start: NaiveDate,
    days: u32,
}

impl Horizon {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Last date inside the window.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.days) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// 0-based index of `date` within the window.
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.start).num_days() as usize)
    }

    /// The window's dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..i64::from(self.days)).map(move |offset| start + Duration::days(offset))
    }

    /// The same-length window ending the day before this one starts.
    ///
    /// Used as the trailing reference window for actual usage.
    pub fn trailing_window(&self) -> Horizon {
        Self {
            start: self.start - Duration::days(i64::from(self.days)),
            days: self.days,
        }
    }
}
