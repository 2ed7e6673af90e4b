use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Per-deliverable exclusion rules. Sundays are never working days and are
/// not configurable; Saturdays and holidays are excluded per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOptions {
    #[serde(default = "default_exclude_holidays")]
    pub exclude_holidays: bool,
    #[serde(default)]
    pub exclude_saturdays: bool,
}

fn default_exclude_holidays() -> bool {
    true
}

impl Default for DayOptions {
    fn default() -> Self {
        Self {
            exclude_holidays: true,
            exclude_saturdays: false,
        }
    }
}

/// Versioned holiday lookup: one literal date list per covered year.
/// Extending coverage to a new year means supplying new literals via
/// [`HolidayTable::add_year`]; nothing is computed from recurrence rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayTable {
    years: BTreeMap<i32, BTreeSet<NaiveDate>>,
}

/// Indian national holidays, as (year, month, day) literals.
const INDIAN_HOLIDAYS: [(i32, u32, u32); 18] = [
    // 2025
    (2025, 1, 26),  // Republic Day
    (2025, 3, 14),  // Holi
    (2025, 3, 31),  // Eid-ul-Fitr
    (2025, 4, 14),  // Ambedkar Jayanti / Baisakhi
    (2025, 4, 18),  // Good Friday
    (2025, 8, 15),  // Independence Day
    (2025, 10, 2),  // Gandhi Jayanti / Dussehra
    (2025, 10, 20), // Diwali
    (2025, 12, 25), // Christmas
    // 2026
    (2026, 1, 26),  // Republic Day
    (2026, 3, 3),   // Holi
    (2026, 3, 20),  // Eid-ul-Fitr
    (2026, 4, 14),  // Ambedkar Jayanti
    (2026, 8, 15),  // Independence Day
    (2026, 10, 2),  // Gandhi Jayanti
    (2026, 10, 20), // Dussehra
    (2026, 11, 8),  // Diwali
    (2026, 12, 25), // Christmas
];

impl HolidayTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table: Indian national holidays for 2025 and 2026.
    pub fn indian_national() -> Self {
        let mut table = Self::default();
        for (year, month, day) in INDIAN_HOLIDAYS {
            table.add_holiday(NaiveDate::from_ymd_opt(year, month, day).unwrap());
        }
        table
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.years.entry(date.year()).or_default().insert(date);
    }

    /// Replace the holiday list for one year with the given dates.
    /// Dates from other years are ignored rather than misfiled.
    pub fn add_year<I>(&mut self, year: i32, dates: I)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let entry = self.years.entry(year).or_default();
        entry.clear();
        entry.extend(dates.into_iter().filter(|d| d.year() == year));
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.years
            .get(&date.year())
            .is_some_and(|dates| dates.contains(&date))
    }

    pub fn covered_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn dates_for_year(&self, year: i32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.years.get(&year).into_iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.values().all(BTreeSet::is_empty)
    }
}

/// Working-day rules for a roadmap: the shared holiday table plus the
/// unconditional Sunday exclusion. Saturday and holiday exclusion are
/// decided per call through [`DayOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalendar {
    holidays: HolidayTable,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new(HolidayTable::indian_national())
    }
}

impl WorkCalendar {
    pub fn new(holidays: HolidayTable) -> Self {
        Self { holidays }
    }

    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    pub fn holidays_mut(&mut self) -> &mut HolidayTable {
        &mut self.holidays
    }

    /// Check whether a date counts as a working day under the given options.
    pub fn is_working_day(&self, date: NaiveDate, options: &DayOptions) -> bool {
        if date.weekday() == Weekday::Sun {
            return false;
        }
        if options.exclude_saturdays && date.weekday() == Weekday::Sat {
            return false;
        }
        if options.exclude_holidays && self.holidays.contains(date) {
            return false;
        }
        true
    }

    /// Advance `start` by `count` working days. The anchor itself is never
    /// counted and never validated; the result is always a working day when
    /// `count >= 1`. A zero or negative count returns `start` unchanged.
    pub fn add_working_days(
        &self,
        start: NaiveDate,
        count: i64,
        options: &DayOptions,
    ) -> NaiveDate {
        if count <= 0 {
            return start;
        }
        let mut current = start;
        let mut added = 0;
        while added < count {
            current += Duration::days(1);
            if self.is_working_day(current, options) {
                added += 1;
            }
        }
        current
    }

    /// Count working days in `(start, end]`: exclusive of the anchor,
    /// inclusive of the end. Returns 0 when `start > end`.
    ///
    /// Inverse of [`add_working_days`](Self::add_working_days): when `end`
    /// sits on a working-day boundary,
    /// `add_working_days(start, working_days_between(start, end))` lands on
    /// `end` again.
    pub fn working_days_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        options: &DayOptions,
    ) -> i64 {
        if start > end {
            return 0;
        }
        let mut current = start;
        let mut count = 0;
        while current < end {
            current += Duration::days(1);
            if self.is_working_day(current, options) {
                count += 1;
            }
        }
        count
    }

    /// First working day on or after `from` under the given options.
    pub fn next_working_day_on_or_after(
        &self,
        from: NaiveDate,
        options: &DayOptions,
    ) -> NaiveDate {
        let mut current = from;
        while !self.is_working_day(current, options) {
            current += Duration::days(1);
        }
        current
    }
}

/// Raised when a boundary date string is not a valid `YYYY-MM-DD` date.
/// Arithmetic never sees an invalid date; parsing fails fast here instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    input: String,
}

impl DateParseError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid calendar date '{}' (expected YYYY-MM-DD)",
            self.input
        )
    }
}

impl std::error::Error for DateParseError {}

/// Parse a boundary `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| DateParseError::new(input))
}

/// Format a calendar date for the boundary (`YYYY-MM-DD`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
