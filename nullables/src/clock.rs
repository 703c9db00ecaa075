//! Nullable clock — deterministic time for testing.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use veridia_types::Clock;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Mutex<DateTime<Utc>>,
}

impl NullClock {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// A clock frozen at `secs` seconds after the Unix epoch.
    pub fn at_secs(secs: i64) -> Self {
        Self::new(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        let mut current = self.current.lock().unwrap();
        *current += Duration::seconds(secs);
    }
}

impl Clock for NullClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_moves_only_when_told() {
        let clock = NullClock::at_secs(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);
        clock.advance(60);
        assert_eq!(clock.now().timestamp(), 1_700_000_060);
    }
}
