//! Usage-limit constants and evaluation.
//!
//! Two independent quotas apply per user: AI generations per calendar
//! month and total plant count. The monthly quota resets implicitly
//! because the persisted counter is keyed by month string; no reset job
//! exists. Evaluation here is pure; reading the counters and deciding
//! the fail-open policy on read errors belong to the API layer.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::Timestamp;

/// AI plant generations allowed per user per calendar month.
pub const AI_GENERATIONS_PER_MONTH: i64 = 20;

/// Total plants allowed per user.
pub const MAX_PLANTS_PER_USER: i64 = 100;

/// Outcome of evaluating one quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitStatus {
    /// Whether another use is allowed right now.
    pub allowed: bool,
    /// Units consumed so far in the quota window.
    pub used: i64,
    /// The fixed ceiling.
    pub limit: i64,
}

impl LimitStatus {
    /// Evaluate a quota. `allowed` is strict: a user at exactly the
    /// limit is blocked.
    pub fn evaluate(used: i64, limit: i64) -> Self {
        Self {
            allowed: used < limit,
            used,
            limit,
        }
    }

    /// The open status used when the counter store cannot be read:
    /// availability wins over strict enforcement.
    pub fn open(limit: i64) -> Self {
        Self::evaluate(0, limit)
    }
}

/// Key identifying the current quota window, e.g. `"2025-06"`.
///
/// The persisted counter row is keyed by this string, which is what
/// makes the monthly reset implicit.
pub fn month_key(now: Timestamp) -> String {
    now.format("%Y-%m").to_string()
}

/// First day of the month after `now`: the date the AI quota resets.
pub fn resets_on(now: Timestamp) -> NaiveDate {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    // Day 1 of a valid month always exists.
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always a valid date")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn at(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn fresh_user_is_allowed_with_zero_used() {
        let status = LimitStatus::evaluate(0, AI_GENERATIONS_PER_MONTH);
        assert!(status.allowed);
        assert_eq!(status.used, 0);
        assert_eq!(status.limit, 20);
    }

    #[test]
    fn at_the_limit_is_blocked() {
        let status = LimitStatus::evaluate(20, AI_GENERATIONS_PER_MONTH);
        assert!(!status.allowed);
    }

    #[test]
    fn one_below_the_limit_is_allowed() {
        assert!(LimitStatus::evaluate(19, AI_GENERATIONS_PER_MONTH).allowed);
        assert!(LimitStatus::evaluate(99, MAX_PLANTS_PER_USER).allowed);
    }

    #[test]
    fn open_status_reports_zero_used() {
        let status = LimitStatus::open(AI_GENERATIONS_PER_MONTH);
        assert!(status.allowed);
        assert_eq!(status.used, 0);
    }

    #[test]
    fn month_key_formats_year_and_month() {
        assert_eq!(month_key(at("2025-06-15T12:00:00Z")), "2025-06");
        assert_eq!(month_key(at("2025-01-01T00:00:00Z")), "2025-01");
    }

    #[test]
    fn resets_on_first_of_next_month() {
        assert_eq!(
            resets_on(at("2025-06-15T12:00:00Z")),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
    }

    #[test]
    fn resets_on_rolls_over_the_year() {
        assert_eq!(
            resets_on(at("2025-12-31T23:59:59Z")),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn month_keys_differ_across_the_reset_boundary() {
        // The implicit reset: a new month means a new counter row.
        assert_ne!(
            month_key(at("2025-06-30T23:59:59Z")),
            month_key(at("2025-07-01T00:00:00Z"))
        );
    }
}
