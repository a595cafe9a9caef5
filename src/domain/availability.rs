//! Time-range availability rules
//!
//! A charger's schedule is a list of half-open `[start, end)` intervals.
//! `is_available` decides whether a candidate interval may be booked.
//!
//! The production rule is intentionally asymmetric: it only tests whether
//! the candidate's *start* lands strictly inside an occupied interval. A
//! long candidate can therefore swallow a shorter occupied interval without
//! being rejected, and intervals may share endpoints. Pending product
//! clarification, `is_available_strict` implements the symmetric overlap
//! test and is selectable via the `booking.strict_overlap_check` config
//! flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Half-open `[start, end)` time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRange {
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Signed whole-hour duration, end minus start
    pub fn whole_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }

    /// Whether `instant` lies strictly inside this range
    pub fn contains_strictly(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    /// Symmetric half-open overlap test
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Decide whether `candidate` may be booked against `occupied` intervals.
///
/// Rejects when the candidate is inverted (`start > end`), starts in the
/// past, or starts strictly inside any occupied interval. Accepts
/// otherwise. Pure; performs no I/O.
pub fn is_available(candidate: &TimeRange, occupied: &[TimeRange], now: DateTime<Utc>) -> bool {
    if candidate.start > candidate.end {
        return false;
    }
    if candidate.start < now {
        return false;
    }
    occupied
        .iter()
        .all(|taken| !taken.contains_strictly(candidate.start))
}

/// Stricter variant: rejects any symmetric overlap with an occupied
/// interval, not just a start-inside conflict.
pub fn is_available_strict(
    candidate: &TimeRange,
    occupied: &[TimeRange],
    now: DateTime<Utc>,
) -> bool {
    if candidate.start > candidate.end {
        return false;
    }
    if candidate.start < now {
        return false;
    }
    occupied.iter().all(|taken| !taken.overlaps(candidate))
}

/// Which overlap rule to apply, derived from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapRule {
    /// Test only the candidate's start against occupied intervals
    StartInside,
    /// Reject any symmetric overlap
    Strict,
}

impl OverlapRule {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::StartInside
        }
    }

    pub fn check(&self, candidate: &TimeRange, occupied: &[TimeRange], now: DateTime<Utc>) -> bool {
        match self {
            Self::StartInside => is_available(candidate, occupied, now),
            Self::Strict => is_available_strict(candidate, occupied, now),
        }
    }
}

/// Validity of the interval itself, independent of the charger's schedule.
/// Reservation-time check only; the past-start rule is not re-applied later.
pub fn validate_interval(candidate: &TimeRange, now: DateTime<Utc>) -> Result<(), &'static str> {
    if candidate.start > candidate.end {
        return Err("start time is after end time");
    }
    if candidate.start < now {
        return Err("start time is in the past");
    }
    Ok(())
}

/// Hours billed for a range: signed whole-hour difference (end - start).
/// Ordering is not validated here; callers must pass end after start.
pub fn booking_hours(range: &TimeRange) -> i64 {
    range.whole_hours()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn range(from_hours: i64, to_hours: i64, base: DateTime<Utc>) -> TimeRange {
        TimeRange::new(base + Duration::hours(from_hours), base + Duration::hours(to_hours))
    }

    #[test]
    fn rejects_inverted_range() {
        let now = Utc::now();
        let candidate = range(4, 2, now);
        assert!(!is_available(&candidate, &[], now));
        assert!(!is_available_strict(&candidate, &[], now));
    }

    #[test]
    fn accepts_zero_length_range() {
        // start == end is not inverted under the observed rule
        let now = Utc::now();
        let candidate = range(2, 2, now);
        assert!(is_available(&candidate, &[], now));
    }

    #[test]
    fn rejects_start_in_the_past() {
        let now = Utc::now();
        let candidate = range(-1, 2, now);
        assert!(!is_available(&candidate, &[], now));
    }

    #[test]
    fn rejects_start_strictly_inside_occupied() {
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        let candidate = range(3, 5, now);
        assert!(!is_available(&candidate, &occupied, now));
    }

    #[test]
    fn accepts_start_after_occupied() {
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        let candidate = range(5, 6, now);
        assert!(is_available(&candidate, &occupied, now));
    }

    #[test]
    fn accepts_shared_endpoint() {
        // start exactly at an occupied boundary is not "strictly inside"
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        assert!(is_available(&range(4, 6, now), &occupied, now));
        assert!(is_available(&range(1, 2, now), &occupied, now));
    }

    #[test]
    fn asymmetric_rule_lets_candidate_swallow_occupied() {
        // Known quirk of the observed rule: a candidate that starts before
        // and ends after an occupied interval is accepted.
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        let swallowing = range(1, 6, now);
        assert!(is_available(&swallowing, &occupied, now));
        assert!(!is_available_strict(&swallowing, &occupied, now));
    }

    #[test]
    fn strict_rule_rejects_any_overlap() {
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        assert!(!is_available_strict(&range(3, 5, now), &occupied, now));
        assert!(!is_available_strict(&range(1, 3, now), &occupied, now));
        // shared endpoints still allowed under half-open semantics
        assert!(is_available_strict(&range(4, 6, now), &occupied, now));
    }

    #[test]
    fn overlap_rule_dispatches_on_flag() {
        let now = Utc::now();
        let occupied = vec![range(2, 4, now)];
        let swallowing = range(1, 6, now);
        assert!(OverlapRule::from_strict_flag(false).check(&swallowing, &occupied, now));
        assert!(!OverlapRule::from_strict_flag(true).check(&swallowing, &occupied, now));
    }

    #[test]
    fn whole_hours_is_signed() {
        let now = Utc::now();
        assert_eq!(range(2, 5, now).whole_hours(), 3);
        assert_eq!(range(5, 2, now).whole_hours(), -3);
        // sub-hour remainder truncates
        let r = TimeRange::new(now, now + Duration::minutes(90));
        assert_eq!(r.whole_hours(), 1);
    }

    #[test]
    fn validate_interval_matches_checker() {
        let now = Utc::now();
        assert!(validate_interval(&range(1, 2, now), now).is_ok());
        assert!(validate_interval(&range(4, 2, now), now).is_err());
        assert!(validate_interval(&range(-1, 2, now), now).is_err());
    }
}
