//! Time source for services, swappable in tests.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to milliseconds so stored values survive a
/// round trip through the ISO encoding unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Millisecond timestamp id, bumped until it is not `taken`.
pub fn fresh_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut n = now.timestamp_millis();
    loop {
        let id = n.to_string();
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_never_collide() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let first = fresh_id(t, |_| false);
        let second = fresh_id(t, |id| id == first);
        assert_eq!(first, t.timestamp_millis().to_string());
        assert_eq!(second, (t.timestamp_millis() + 1).to_string());
    }
}
