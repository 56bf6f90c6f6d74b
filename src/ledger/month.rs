use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::FinanceError;

const SHORT_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const LONG_LABELS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// A calendar month used to filter and group transactions.
///
/// The month number is always within `1..=12`, including after deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMonthKey")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawMonthKey {
    year: i32,
    month: u32,
}

impl TryFrom<RawMonthKey> for MonthKey {
    type Error = FinanceError;

    fn try_from(raw: RawMonthKey) -> Result<Self, Self::Error> {
        MonthKey::new(raw.year, raw.month).ok_or_else(|| {
            FinanceError::Validation(format!("month {} is outside 1..=12", raw.month))
        })
    }
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Moves the month forward (positive) or backward (negative), crossing years.
    pub fn shift(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Offsets from the first of the month without clamping, so day 31 of a
    /// 30-day month lands on the 1st of the following month.
    pub fn day_offset(&self, day: u32) -> NaiveDate {
        self.first_day() + Duration::days(i64::from(day.saturating_sub(1)))
    }

    pub fn short_label(&self) -> &'static str {
        SHORT_LABELS[(self.month - 1) as usize]
    }

    pub fn long_label(&self) -> String {
        format!("{} de {}", LONG_LABELS[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || FinanceError::Validation(format!("`{value}` is not a YYYY-MM month"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}
