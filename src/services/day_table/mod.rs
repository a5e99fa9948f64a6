// Day table
// Day columns shown by an agenda grid

use chrono::{Datelike, Duration, NaiveDate};

/// Source of the day columns a time grid renders. Implemented by whatever
/// lays out the days; the grid only reads from it.
pub trait DayTable {
    /// Dates in chronological order, one per day index.
    fn day_dates(&self) -> &[NaiveDate];

    /// Whether columns run right-to-left.
    fn is_rtl(&self) -> bool;

    fn days_per_row(&self) -> usize {
        self.day_dates().len()
    }

    fn col_count(&self) -> usize {
        self.days_per_row()
    }

    /// Visual column of a day index.
    fn day_index_to_col(&self, day_index: usize) -> usize {
        if self.is_rtl() {
            self.days_per_row().saturating_sub(1 + day_index)
        } else {
            day_index
        }
    }

    /// Date shown in the cell at (`row`, `col`). The agenda grid has a single
    /// row of days.
    fn cell_date(&self, row: usize, col: usize) -> Option<NaiveDate> {
        let per_row = self.days_per_row();
        if col >= per_row {
            return None;
        }
        let day_index = row * per_row + self.day_index_to_col(col);
        self.day_dates().get(day_index).copied()
    }
}

/// A plain run of dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumns {
    dates: Vec<NaiveDate>,
    is_rtl: bool,
}

impl DayColumns {
    pub fn new(dates: Vec<NaiveDate>, is_rtl: bool) -> Self {
        Self { dates, is_rtl }
    }

    /// `count` consecutive days from `start`.
    pub fn consecutive(start: NaiveDate, count: usize, is_rtl: bool) -> Self {
        let dates = (0..count as i64).map(|offset| start + Duration::days(offset)).collect();
        Self::new(dates, is_rtl)
    }

    /// The seven days of the week containing `date`.
    ///
    /// `first_day_of_week`: 0 = Sunday, 1 = Monday, etc.
    pub fn week_of(date: NaiveDate, first_day_of_week: u8, is_rtl: bool) -> Self {
        Self::consecutive(week_start(date, first_day_of_week), 7, is_rtl)
    }
}

impl DayTable for DayColumns {
    fn day_dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    fn is_rtl(&self) -> bool {
        self.is_rtl
    }
}

/// Start of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}
