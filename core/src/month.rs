// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;

use crate::date::{days_in_month, first_weekday_of_month, month_name, normalize_month};

/// The 7-column layout of a month, weeks start on Sunday.
///
/// Cells before the first day of the month are blank (`None`), the trailing week is
/// not padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month_index: u32,
    cells: Vec<Option<NaiveDate>>,
}

impl MonthGrid {
    pub fn new(year: i32, month_index: i32) -> Self {
        let (year, month_index) = normalize_month(year, month_index);
        let leading = first_weekday_of_month(year, month_index as i32);
        let days = days_in_month(year, month_index as i32);

        let mut cells = Vec::with_capacity((leading + days) as usize);
        cells.extend((0..leading).map(|_| None));
        cells.extend((1..=days).map(|day| NaiveDate::from_ymd_opt(year, month_index + 1, day)));

        Self {
            year,
            month_index,
            cells,
        }
    }

    /// The grid of the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    /// Title of the month, e.g. `March 2024`.
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month_index as i32), self.year)
    }

    pub fn cells(&self) -> &[Option<NaiveDate>] {
        &self.cells
    }

    /// Rows of at most 7 cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<NaiveDate>]> {
        self.cells.chunks(7)
    }

    pub fn week_count(&self) -> usize {
        self.cells.len().div_ceil(7)
    }

    /// Row and column of the date within the grid, if it belongs to this month.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|a| *a == Some(date))
            .map(|i| (i / 7, i % 7))
    }
}
