// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Month helpers for driving the date-range picker.

use chrono::{Datelike, Local, Month, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInfo {
    /// 1 based
    pub number: u32,
    pub name: &'static str,
    pub short_name: &'static str,
    pub year: i32,
}

impl MonthInfo {
    pub fn of(date: NaiveDate) -> Self {
        let number = date.month();
        let name = u8::try_from(number)
            .ok()
            .and_then(|n| Month::try_from(n).ok())
            .map(|m| m.name())
            .unwrap_or("");
        Self {
            number,
            name,
            short_name: name.get(..3).unwrap_or(name),
            year: date.year(),
        }
    }

    /// First day of the month, e.g. `2025-09-01`.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.number, 1)
    }

    /// `YYYY-MM-DD` for a day of this month.
    pub fn ymd(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.number, day)
    }
}

/// The month `delta` months away from `date`; day overflow clamps to the month end.
pub fn shift_months(date: NaiveDate, delta: i32) -> MonthInfo {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    MonthInfo::of(shifted.unwrap_or(date))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_month() -> MonthInfo {
    MonthInfo::of(today())
}

pub fn next_month() -> MonthInfo {
    shift_months(today(), 1)
}

pub fn previous_month() -> MonthInfo {
    shift_months(today(), -1)
}

pub fn current_year() -> i32 {
    today().year()
}
