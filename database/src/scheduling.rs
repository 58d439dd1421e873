use chrono::{DateTime, Utc};

/// An appointment blocks its doctor for 29 minutes on either side,
/// boundary included.
pub const CONFLICT_WINDOW_MINUTES: i64 = 29;

/// True when two appointment timestamps for one doctor collide under the
/// symmetric, inclusive window. The comparison is done in seconds so a
/// 29m30s gap does not get truncated into a false conflict.
pub fn within_conflict_window(existing: DateTime<Utc>, requested: DateTime<Utc>) -> bool {
    let delta = existing
        .signed_duration_since(requested)
        .num_seconds()
        .abs();
    delta <= CONFLICT_WINDOW_MINUTES * 60
}

/// Slide the window over every existing booking for the doctor and return
/// the first colliding timestamp, if any. This is deliberately not a slot
/// grid: any existing booking within the window blocks the new one.
pub fn find_conflict(
    existing: &[DateTime<Utc>],
    requested: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    existing
        .iter()
        .copied()
        .find(|booked| within_conflict_window(*booked, requested))
}

/// Bookings must be strictly in the future.
pub fn is_bookable(requested: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    requested > now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn same_instant_conflicts() {
        assert!(within_conflict_window(base(), base()));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let at_29 = base() + Duration::minutes(29);
        assert!(within_conflict_window(base(), at_29));
        assert!(within_conflict_window(at_29, base()));
    }

    #[test]
    fn just_past_the_window_is_free() {
        let past = base() + Duration::minutes(29) + Duration::seconds(1);
        assert!(!within_conflict_window(base(), past));
        assert!(!within_conflict_window(past, base()));

        let at_30 = base() + Duration::minutes(30);
        assert!(!within_conflict_window(base(), at_30));
    }

    #[test]
    fn window_is_symmetric() {
        let before = base() - Duration::minutes(15);
        let after = base() + Duration::minutes(15);
        assert!(within_conflict_window(before, base()));
        assert!(within_conflict_window(after, base()));
    }

    #[test]
    fn find_conflict_scans_all_bookings() {
        let booked = vec![
            base() - Duration::hours(2),
            base() + Duration::hours(1),
            base() + Duration::minutes(20),
        ];
        assert_eq!(
            find_conflict(&booked, base()),
            Some(base() + Duration::minutes(20))
        );
    }

    #[test]
    fn no_conflict_when_all_bookings_are_far() {
        let booked = vec![base() - Duration::hours(1), base() + Duration::hours(1)];
        assert_eq!(find_conflict(&booked, base()), None);
        assert_eq!(find_conflict(&[], base()), None);
    }

    #[test]
    fn past_and_present_are_not_bookable() {
        let now = base();
        assert!(!is_bookable(now - Duration::minutes(1), now));
        assert!(!is_bookable(now, now));
        assert!(is_bookable(now + Duration::seconds(1), now));
    }
}
