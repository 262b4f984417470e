//! Calendar arithmetic for subscription periods.
//!
//! Months are added with chrono's calendar rules: when the target month is
//! shorter the day is clamped to its last day, so `2024-01-31 + 1 month` is
//! `2024-02-29`. A zero-month plan is a trial and lasts exactly one day.

use crate::prelude::*;

/// End of a period of `months` starting at `start`.
///
/// Never panics. Dates past chrono's range saturate at the maximum.
pub fn plan_end(start: DateTime, months: u32) -> DateTime {
  let end = if months == 0 {
    start.checked_add_days(Days::new(1))
  } else {
    start.checked_add_months(Months::new(months))
  };
  end.unwrap_or(DateTime::MAX)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(y: i32, m: u32, d: u32) -> DateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(10, 30, 0).unwrap()
  }

  #[test]
  fn test_trial_is_one_day() {
    let start = at(2024, 2, 28);
    assert_eq!(plan_end(start, 0), at(2024, 2, 29));
    assert_eq!(plan_end(start, 0) - start, TimeDelta::hours(24));
  }

  #[test]
  fn test_month_end_clamps() {
    assert_eq!(plan_end(at(2024, 1, 31), 1), at(2024, 2, 29));
    assert_eq!(plan_end(at(2023, 1, 31), 1), at(2023, 2, 28));
    assert_eq!(plan_end(at(2024, 1, 31), 3), at(2024, 4, 30));
    assert_eq!(plan_end(at(2024, 3, 15), 12), at(2025, 3, 15));
  }

  #[test]
  fn test_keeps_time_of_day() {
    let end = plan_end(at(2024, 5, 5), 6);
    assert_eq!(end.time(), at(2024, 5, 5).time());
  }

  #[test]
  fn test_saturates_on_overflow() {
    assert_eq!(plan_end(DateTime::MAX, 1), DateTime::MAX);
    assert_eq!(plan_end(DateTime::MAX, 0), DateTime::MAX);
  }
}
