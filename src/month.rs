//! In-memory month data: the mapping from a calendar date to its task list

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// The ordered task list for one calendar date. Order is insertion order and
/// is the display order.
pub type DayRecord = Vec<Task>;

/// The persistence partition: one calendar year + month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// The month a date belongs to.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// All tasks of one calendar month, keyed by date.
///
/// A date key is present if and only if its day record is non-empty:
/// [`set_day`](MonthFile::set_day) maintains this eagerly, and
/// [`pruned`](MonthFile::pruned) re-establishes it before a save. Dates are
/// kept in a `BTreeMap` so serializing the same contents always produces the
/// same bytes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthFile {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl MonthFile {
    /// A month with no tasks yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tasks for `date`. A date with no entry simply has no tasks.
    pub fn day(&self, date: NaiveDate) -> &[Task] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the tasks for `date`. An empty record removes the date key,
    /// so mid-session reads see the same view a save-and-reload would.
    pub fn set_day(&mut self, date: NaiveDate, record: DayRecord) {
        if record.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, record);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// The dates that have tasks, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// A copy with empty day records dropped. The on-disk representation
    /// never contains empty records.
    pub(crate) fn pruned(&self) -> Self {
        Self {
            days: self
                .days
                .iter()
                .filter(|(_, record)| !record.is_empty())
                .map(|(date, record)| (*date, record.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn missing_day_is_empty_not_an_error() {
        let month = MonthFile::new();
        assert!(month.day(date("2024-05-10")).is_empty());
    }

    #[test]
    fn set_day_removes_emptied_dates() {
        let mut month = MonthFile::new();
        let day = date("2024-05-10");
        month.set_day(day, vec![Task::new("Buy milk".to_string(), false)]);
        assert_eq!(month.len(), 1);

        month.set_day(day, Vec::new());
        assert!(month.is_empty());
    }

    #[test]
    fn month_key_contains() {
        let key = MonthKey::of(date("2024-05-10"));
        assert_eq!(key, MonthKey { year: 2024, month: 5 });
        assert!(key.contains(date("2024-05-31")));
        assert!(!key.contains(date("2024-06-01")));
        assert_eq!(key.to_string(), "2024-05");
    }

    #[test]
    fn serde_keys_are_plain_dates() {
        let mut month = MonthFile::new();
        month.set_day(
            date("2024-05-10"),
            vec![Task::new("Buy milk".to_string(), true)],
        );
        let json = serde_json::to_string(&month).unwrap();
        assert!(json.contains("\"2024-05-10\""));

        let back: MonthFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
