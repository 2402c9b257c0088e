//! Watering schedule arithmetic.
//!
//! Derives when a plant is next due, how many days remain, and whether
//! it is overdue from its watering frequency and the timestamp of its
//! most recent watering. The derived fields are recomputed on every
//! read and never stored.

use chrono::Duration;
use serde::Serialize;

use crate::types::Timestamp;

/// Milliseconds per day, the unit the day-count arithmetic rounds over.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Derived watering schedule for a single plant.
///
/// All fields are `None`/`false` for a plant that has never been
/// watered; there is no schedule to be late against yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WateringStatus {
    /// When the plant is next due, `last_watered_at + frequency` exactly.
    pub next_watering_at: Option<Timestamp>,
    /// Whole days until the next watering, rounded up. Negative when
    /// the plant is overdue.
    pub days_until_watering: Option<i64>,
    /// True iff `days_until_watering` is negative. A value of exactly
    /// zero means "due today", which is not overdue.
    pub is_overdue: bool,
}

impl WateringStatus {
    /// The status of a plant with no watering history.
    pub fn never_watered() -> Self {
        Self {
            next_watering_at: None,
            days_until_watering: None,
            is_overdue: false,
        }
    }
}

/// Compute the derived watering schedule for one plant.
///
/// `frequency_days` is assumed to already satisfy
/// [`crate::validation::validate_frequency`]; this function itself has
/// no error conditions and is a pure function of its inputs.
pub fn watering_status(
    frequency_days: i32,
    last_watered_at: Option<Timestamp>,
    now: Timestamp,
) -> WateringStatus {
    let Some(last_watered_at) = last_watered_at else {
        return WateringStatus::never_watered();
    };

    let next_watering_at = last_watered_at + Duration::days(i64::from(frequency_days));
    let days_until_watering = ceil_days(next_watering_at - now);

    WateringStatus {
        next_watering_at: Some(next_watering_at),
        days_until_watering: Some(days_until_watering),
        is_overdue: days_until_watering < 0,
    }
}

/// Human-readable schedule label, as shown in plant lists.
///
/// This is behaviour, not styling: the tier boundaries ("due today" vs
/// "overdue") are part of the schedule contract.
pub fn status_label(days_until_watering: Option<i64>) -> String {
    match days_until_watering {
        None => "Not yet watered".to_string(),
        Some(d) if d < 0 => {
            let overdue = -d;
            if overdue == 1 {
                "1 day overdue".to_string()
            } else {
                format!("{overdue} days overdue")
            }
        }
        Some(0) => "Water today".to_string(),
        Some(1) => "Tomorrow".to_string(),
        Some(d) => format!("In {d} days"),
    }
}

/// Ceiling of `delta / 1 day`, computed in milliseconds.
///
/// Integer ceiling division so that a schedule missed by less than a
/// full day still counts as "due today" (0) rather than overdue.
fn ceil_days(delta: Duration) -> i64 {
    let ms = delta.num_milliseconds();
    ms.div_euclid(MS_PER_DAY) + i64::from(ms.rem_euclid(MS_PER_DAY) > 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    // -- never watered --

    #[test]
    fn never_watered_has_no_schedule() {
        let status = watering_status(7, None, at("2025-06-15T12:00:00Z"));
        assert_eq!(status, WateringStatus::never_watered());
        assert!(!status.is_overdue);
    }

    // -- next_watering_at round-trip --

    #[test]
    fn next_watering_is_exactly_last_plus_frequency() {
        let last = at("2025-06-01T08:30:00Z");
        for freq in [1, 7, 30, 365] {
            let status = watering_status(freq, Some(last), at("2025-06-02T00:00:00Z"));
            assert_eq!(
                status.next_watering_at,
                Some(last + Duration::days(i64::from(freq)))
            );
        }
    }

    // -- overdue boundaries --

    #[test]
    fn due_today_is_not_overdue() {
        let now = at("2025-06-15T12:00:00Z");
        // Watered 7 days ago to the second: next watering is exactly now.
        let status = watering_status(7, Some(now - Duration::days(7)), now);
        assert_eq!(status.days_until_watering, Some(0));
        assert!(!status.is_overdue);
    }

    #[test]
    fn one_millisecond_late_rounds_to_due_today() {
        let now = at("2025-06-15T12:00:00Z");
        let last = now - Duration::days(7) - Duration::milliseconds(1);
        let status = watering_status(7, Some(last), now);
        // Next watering was 1 ms ago; still counts as day zero.
        assert_eq!(status.days_until_watering, Some(0));
        assert!(!status.is_overdue);
    }

    #[test]
    fn a_full_day_late_is_overdue() {
        let now = at("2025-06-15T12:00:00Z");
        let status = watering_status(7, Some(now - Duration::days(8)), now);
        assert_eq!(status.days_until_watering, Some(-1));
        assert!(status.is_overdue);
    }

    #[test]
    fn watered_ten_days_ago_on_weekly_schedule_is_three_days_overdue() {
        let now = at("2025-06-15T12:00:00Z");
        let status = watering_status(7, Some(now - Duration::days(10)), now);
        assert_eq!(status.days_until_watering, Some(-3));
        assert!(status.is_overdue);
        assert_eq!(status_label(status.days_until_watering), "3 days overdue");
    }

    #[test]
    fn partial_day_remaining_rounds_up() {
        let now = at("2025-06-15T12:00:00Z");
        // Watered 6.5 days ago on a weekly schedule: half a day remains,
        // which rounds up to "due tomorrow".
        let last = now - Duration::days(6) - Duration::hours(12);
        let status = watering_status(7, Some(last), now);
        assert_eq!(status.days_until_watering, Some(1));
        assert!(!status.is_overdue);
    }

    // -- labels --

    #[test]
    fn label_tiers() {
        assert_eq!(status_label(None), "Not yet watered");
        assert_eq!(status_label(Some(-2)), "2 days overdue");
        assert_eq!(status_label(Some(-1)), "1 day overdue");
        assert_eq!(status_label(Some(0)), "Water today");
        assert_eq!(status_label(Some(1)), "Tomorrow");
        assert_eq!(status_label(Some(5)), "In 5 days");
    }
}
