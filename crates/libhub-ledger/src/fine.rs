//! Overdue-fine accrual.
//!
//! A fine is charged per whole day a book is kept past its due date; a
//! partial day counts as a full one. Returning on the due date itself is on
//! time. Nothing here reads the clock: "today" is always an input.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FINE_PER_DAY: u64 = 5;
pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Flat per-day fine rate. No cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinePolicy {
    pub fine_per_day: u64,
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self {
            fine_per_day: DEFAULT_FINE_PER_DAY,
        }
    }
}

impl FinePolicy {
    pub fn new(fine_per_day: u64) -> Self {
        Self { fine_per_day }
    }

    /// Fine for a loan due on `due`.
    ///
    /// With a return date the fine is settled against it; without one the
    /// loan is still out and accrues against `today`.
    pub fn calculate(&self, due: NaiveDate, returned: Option<NaiveDate>, today: NaiveDate) -> u64 {
        let settled_on = returned.unwrap_or(today);
        self.for_days(overdue_days(due, settled_on))
    }

    /// Fine for a loan due at instant `due`, measured at instant `at`.
    pub fn calculate_at(&self, due: NaiveDateTime, at: NaiveDateTime) -> u64 {
        self.for_days(overdue_days_between(due, at))
    }

    fn for_days(&self, days: u64) -> u64 {
        days.saturating_mul(self.fine_per_day)
    }
}

/// Fine at the default rate. See [`FinePolicy::calculate`].
pub fn calculate_fine(due: NaiveDate, returned: Option<NaiveDate>, today: NaiveDate) -> u64 {
    FinePolicy::default().calculate(due, returned, today)
}

/// Whole calendar days `at` lies past `due`; zero when not late.
pub fn overdue_days(due: NaiveDate, at: NaiveDate) -> u64 {
    let days = at.signed_duration_since(due).num_days();
    u64::try_from(days).unwrap_or(0)
}

/// Days `at` lies past `due`, partial days rounded up; zero when not late.
pub fn overdue_days_between(due: NaiveDateTime, at: NaiveDateTime) -> u64 {
    let elapsed = at.signed_duration_since(due);
    if elapsed <= TimeDelta::zero() {
        return 0;
    }
    // Lateness under a millisecond truncates to zero millis.
    let millis = u64::try_from(elapsed.num_milliseconds()).unwrap_or(0);
    millis.div_ceil(MILLIS_PER_DAY).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("fixture date should parse")
    }

    #[test]
    fn late_return_charges_per_day() {
        assert_eq!(
            calculate_fine(date("2023-09-19"), Some(date("2023-09-24")), date("2030-01-01")),
            25
        );
    }

    #[test]
    fn return_on_due_date_is_free() {
        assert_eq!(
            calculate_fine(date("2023-09-19"), Some(date("2023-09-19")), date("2023-10-30")),
            0
        );
    }

    #[test]
    fn outstanding_loan_on_due_date_is_not_overdue() {
        assert_eq!(
            calculate_fine(date("2023-09-19"), None, date("2023-09-19")),
            0
        );
    }

    #[test]
    fn outstanding_loan_accrues_against_today() {
        assert_eq!(
            calculate_fine(date("2023-09-19"), None, date("2023-09-21")),
            10
        );
    }

    #[test]
    fn early_return_is_free() {
        assert_eq!(
            calculate_fine(date("2023-09-19"), Some(date("2023-09-01")), date("2023-09-30")),
            0
        );
    }

    #[test]
    fn custom_rate_applies() {
        let policy = FinePolicy::new(2);
        assert_eq!(
            policy.calculate(date("2024-01-15"), Some(date("2024-01-20")), date("2024-01-20")),
            10
        );
    }

    #[test]
    fn partial_day_rounds_up() {
        let due = date("2024-01-15").and_time(NaiveTime::MIN);
        let at = due + TimeDelta::hours(25);
        assert_eq!(overdue_days_between(due, at), 2);
        assert_eq!(FinePolicy::default().calculate_at(due, at), 10);
    }

    #[test]
    fn instant_at_due_is_not_overdue() {
        let due = date("2024-01-15").and_time(NaiveTime::MIN);
        assert_eq!(overdue_days_between(due, due), 0);
        assert_eq!(overdue_days_between(due, due - TimeDelta::hours(3)), 0);
    }

    #[test]
    fn sub_millisecond_lateness_still_counts_a_day() {
        let due = date("2024-01-15").and_time(NaiveTime::MIN);
        assert_eq!(overdue_days_between(due, due + TimeDelta::nanoseconds(1)), 1);
        assert_eq!(overdue_days_between(due, due + TimeDelta::microseconds(999)), 1);
    }
}
