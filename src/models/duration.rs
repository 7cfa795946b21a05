//! Sentence duration model.
//!
//! This module defines the [`Duration`] value type used to express sentence
//! terms in years, months, weeks and days, and the calendar arithmetic that
//! turns a term plus a start date into a concrete end date and day count.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A sentence term expressed in calendar units.
///
/// A `Duration` holds a count of years, months, weeks and days. Zero-valued
/// units are permitted and have no effect on the computed end date. The type
/// is an immutable value: combining two durations with [`Duration::append_all`]
/// produces a new `Duration` and leaves both inputs untouched.
///
/// End dates are *inclusive*: a one-month term starting on the 1st of January
/// ends on the 31st of January and is 31 days long.
///
/// # Example
///
/// ```
/// use sentence_engine::models::Duration;
/// use chrono::NaiveDate;
///
/// let term = Duration::from_months(1);
/// let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// assert_eq!(term.end_date(start), NaiveDate::from_ymd_opt(2021, 1, 31).unwrap());
/// assert_eq!(term.length_in_days(start), 31);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    /// Whole years of the term.
    #[serde(default)]
    pub years: u32,
    /// Whole months of the term.
    #[serde(default)]
    pub months: u32,
    /// Whole weeks of the term.
    #[serde(default)]
    pub weeks: u32,
    /// Remaining days of the term.
    #[serde(default)]
    pub days: u32,
}

impl Duration {
    /// Creates a duration from explicit unit counts.
    pub fn new(years: u32, months: u32, weeks: u32, days: u32) -> Self {
        Self {
            years,
            months,
            weeks,
            days,
        }
    }

    /// Creates a duration of whole years.
    pub fn from_years(years: u32) -> Self {
        Self {
            years,
            ..Self::default()
        }
    }

    /// Creates a duration of whole months.
    pub fn from_months(months: u32) -> Self {
        Self {
            months,
            ..Self::default()
        }
    }

    /// Creates a duration of whole weeks.
    pub fn from_weeks(weeks: u32) -> Self {
        Self {
            weeks,
            ..Self::default()
        }
    }

    /// Creates a duration of days.
    pub fn from_days(days: u32) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    /// Returns true when every unit of the term is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.weeks == 0 && self.days == 0
    }

    /// Returns a new duration that is the unit-wise sum of `self` and `other`.
    ///
    /// Neither input is modified. Appending treats missing units as zero, so
    /// `{months: 2}` appended to `{years: 1, days: 3}` is
    /// `{years: 1, months: 2, days: 3}`.
    ///
    /// # Example
    ///
    /// ```
    /// use sentence_engine::models::Duration;
    ///
    /// let custodial = Duration::new(1, 0, 0, 3);
    /// let extension = Duration::from_months(2);
    /// assert_eq!(custodial.append_all(&extension), Duration::new(1, 2, 0, 3));
    /// ```
    pub fn append_all(&self, other: &Duration) -> Duration {
        Duration {
            years: self.years + other.years,
            months: self.months + other.months,
            weeks: self.weeks + other.weeks,
            days: self.days + other.days,
        }
    }

    /// Computes the inclusive end date of the term from `start`.
    ///
    /// When `start` is the first day of a month and the term carries a year
    /// or month component, the end date is anchored to a month boundary: the
    /// year/month total minus one month is added and the result advanced to
    /// the end of that month, before any weeks and days are added. For any
    /// other start, one day is subtracted first and the units added in order,
    /// which yields the inclusive end date directly.
    ///
    /// The month-boundary anchor is what makes "1 month" land predictably
    /// regardless of the originating month's length; naive `start + 1 month`
    /// is wrong at month-end starts.
    pub fn end_date(&self, start: NaiveDate) -> NaiveDate {
        let total_months = self.years * 12 + self.months;

        let anchored = if start.day() == 1 && total_months > 0 {
            end_of_month(start + Months::new(total_months - 1))
        } else {
            start - Days::new(1)
                + Months::new(total_months)
        };

        anchored + Days::new(u64::from(self.weeks) * 7 + u64::from(self.days))
    }

    /// Computes the inclusive day count of the term from `start`.
    ///
    /// A term whose end date equals its start date is one day long; a term
    /// with all units zero is zero days long.
    pub fn length_in_days(&self, start: NaiveDate) -> i64 {
        self.end_date(start).signed_duration_since(start).num_days() + 1
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.years > 0 {
            parts.push(format!("{}y", self.years));
        }
        if self.months > 0 {
            parts.push(format!("{}m", self.months));
        }
        if self.weeks > 0 {
            parts.push(format!("{}w", self.weeks));
        }
        if self.days > 0 || parts.is_empty() {
            parts.push(format!("{}d", self.days));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Returns the last day of the month `date` falls in.
fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first + Months::new(1) - Days::new(1)
}
