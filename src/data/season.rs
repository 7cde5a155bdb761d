//! Broadcast seasons and their air-date filters
//!
//! A season is a calendar quarter identified by its starting month. The search
//! API filters by air date using inclusive `>=` / `<=` bounds, so each season
//! maps to the first and last day of its quarter.

use chrono::{Datelike, NaiveDate};

use crate::error::Error;

/// A three-month broadcast quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// January to March
    Winter,
    /// April to June
    Spring,
    /// July to September
    Summer,
    /// October to December
    Autumn,
}

impl Season {
    /// All seasons in calendar order
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Looks up a season by its starting month (1, 4, 7 or 10)
    pub fn from_month(month: u32) -> Result<Self, Error> {
        match month {
            1 => Ok(Season::Winter),
            4 => Ok(Season::Spring),
            7 => Ok(Season::Summer),
            10 => Ok(Season::Autumn),
            other => Err(Error::InvalidArgument(format!(
                "Season must be one of 1, 4, 7, 10 (got {other})"
            ))),
        }
    }

    /// Month the quarter starts in
    pub fn start_month(self) -> u32 {
        match self {
            Season::Winter => 1,
            Season::Spring => 4,
            Season::Summer => 7,
            Season::Autumn => 10,
        }
    }

    /// Quarter number, 1 through 4
    pub fn quarter(self) -> u32 {
        (self.start_month() - 1) / 3 + 1
    }

    /// First and last calendar day of the quarter in `year`
    pub fn date_range(self, year: i32) -> Result<(NaiveDate, NaiveDate), Error> {
        let out_of_range = || Error::InvalidArgument(format!("Year {year} is out of range"));

        let start_month = self.start_month();
        let end_month = start_month + 2;

        let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or_else(out_of_range)?;
        let end_month_first = NaiveDate::from_ymd_opt(year, end_month, 1).ok_or_else(out_of_range)?;
        let end = last_day_of_month(end_month_first).ok_or_else(out_of_range)?;

        Ok((start, end))
    }

    /// Inclusive air-date bounds in the form the search API expects
    pub fn air_date_filter(self, year: i32) -> Result<[String; 2], Error> {
        let (start, end) = self.date_range(year)?;
        Ok([format!(">={start}"), format!("<={end}")])
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start_month())
    }
}

/// Computes the air-date filter for a `(year, starting month)` pair
///
/// Fails with [`Error::InvalidArgument`] when `season` is not 1, 4, 7 or 10.
pub fn air_date_filter(year: i32, season: u32) -> Result<[String; 2], Error> {
    Season::from_month(season)?.air_date_filter(year)
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let next_month_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    next_month_first.pred_opt()
}
