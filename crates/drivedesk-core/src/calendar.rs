//! Calendar-year arithmetic for duration-based eligibility.
//!
//! "At least N years since date D, as of date A" holds iff `A >= D + N years`,
//! where adding years keeps the month and day. The exact anniversary counts.
//! A 29 February start date has its anniversary on 28 February in non-leap
//! years, so someone born on 2004-02-29 turns 18 on 2022-02-28.
//!
//! The same rule drives both licence holding periods and the customer age
//! check.

use chrono::{Months, NaiveDate};

/// `date` plus `years` calendar years, or `None` if the result is out of range.
pub fn anniversary(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    date.checked_add_months(Months::new(months))
}

/// Whether `years` full calendar years have passed between `since` and `as_of`.
///
/// An anniversary that cannot be represented has not happened yet.
pub fn held_for_at_least(since: NaiveDate, years: u32, as_of: NaiveDate) -> bool {
    anniversary(since, years).is_some_and(|due| as_of >= due)
}

pub fn meets_minimum_age(date_of_birth: NaiveDate, minimum_age: u32, as_of: NaiveDate) -> bool {
    held_for_at_least(date_of_birth, minimum_age, as_of)
}
