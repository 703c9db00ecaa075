//! Clock abstraction and timestamp helpers.
//!
//! Claim timestamps are ISO-8601 strings in UTC with millisecond precision
//! (`2024-05-01T12:00:00.000Z`). Chain timestamps are microseconds since the
//! Unix epoch.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current time. Swapped for a deterministic clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Format a datetime the way claim timestamps are written.
pub fn to_iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert a chain timestamp in microseconds to a UTC datetime.
pub fn from_micros(micros: u64) -> Option<DateTime<Utc>> {
    let micros = i64::try_from(micros).ok()?;
    DateTime::from_timestamp_micros(micros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso8601_has_millis_and_z_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(to_iso8601(at), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn from_micros_handles_out_of_range() {
        assert_eq!(from_micros(0).unwrap().timestamp(), 0);
        assert!(from_micros(u64::MAX).is_none());
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
