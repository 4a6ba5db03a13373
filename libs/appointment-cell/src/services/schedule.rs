// libs/appointment-cell/src/services/schedule.rs
use chrono::{Duration, Local, NaiveDateTime};

/// Hours subtracted from the local clock before comparing against stored
/// appointment times (stored times are three hours ahead of the server clock).
pub const WAITLIST_CLOCK_SHIFT_HOURS: i64 = 3;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Server wall clock.
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Window used by the "tomorrow" listing: today 21:00 up to and including
/// the next calendar day at 20:59.
///
/// This is the long-standing behaviour of the reminder listing and does not
/// cover tomorrow's full calendar day. Kept as is pending product review.
pub fn tomorrow_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let midnight = NaiveDateTime::from(now.date());
    let start = midnight + Duration::hours(21);
    let end = midnight + Duration::days(1) + Duration::hours(20) + Duration::minutes(59);
    (start, end)
}

/// Appointments strictly before this instant are overdue.
pub fn waitlist_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    now - Duration::hours(WAITLIST_CLOCK_SHIFT_HOURS)
}
