use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

use crate::error::{Error, Result};

const WEEKDAYS: [&str; 7] = ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."];
const MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "Mär.", "Apr.", "Mai", "Jun.", "Jul.", "Aug.", "Sep.", "Okt.", "Nov.", "Dez.",
];

/// A local calendar day. Displays as zero-padded `YYYY-MM-DD` and orders by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRelation {
    Past,
    Today,
    Future,
}

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        DayKey(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DayKey)
    }

    /// Parses the canonical form only; `2024-3-5` is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| Error::InvalidDayKey(s.to_string()))?;
        let key = DayKey(date);
        if key.to_string() != s {
            return Err(Error::InvalidDayKey(s.to_string()));
        }
        Ok(key)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn day_number(&self) -> u32 {
        self.0.day()
    }

    /// 0 for Sunday through 6 for Saturday.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(DayKey)
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(DayKey)
    }

    pub fn relation_to(&self, today: DayKey) -> DayRelation {
        match self.cmp(&today) {
            std::cmp::Ordering::Less => DayRelation::Past,
            std::cmp::Ordering::Equal => DayRelation::Today,
            std::cmp::Ordering::Greater => DayRelation::Future,
        }
    }

    /// Display label such as `Fr. 15. Mär. 2024`.
    pub fn label(&self) -> String {
        let weekday = WEEKDAYS[self.weekday_from_sunday() as usize];
        let month = MONTHS[self.0.month0() as usize];
        format!("{} {:02}. {} {}", weekday, self.0.day(), month, self.0.year())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

pub trait Clock {
    fn today(&self) -> DayKey;
}

/// Local wall clock; day boundaries follow the user's timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        DayKey::new(Local::now().date_naive())
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DayKey);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> DayKey {
        self.0
    }
}

/// A displayed calendar month. Always anchored on its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn of(day: DayKey) -> Self {
        Month {
            year: day.0.year(),
            month: day.0.month(),
        }
    }

    pub fn first_day(&self) -> Option<DayKey> {
        DayKey::from_ymd(self.year, self.month, 1)
    }

    pub fn day(&self, day: u32) -> Option<DayKey> {
        DayKey::from_ymd(self.year, self.month, day)
    }

    /// Day zero of the following month.
    pub fn days_in_month(&self) -> u32 {
        self.next()
            .first_day()
            .and_then(|first| first.pred())
            .map(|last| last.day_number())
            .unwrap_or(0)
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Month { year: self.year - 1, month: 12 }
        } else {
            Month { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Month { year: self.year + 1, month: 1 }
        } else {
            Month { year: self.year, month: self.month + 1 }
        }
    }

    /// Label such as `Mär. 2024`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTHS[(self.month - 1) as usize], self.year)
    }
}
