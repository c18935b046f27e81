use std::{thread, time::Duration};

use chrono::{Datelike, Local, NaiveDateTime};

use crate::time::{Clock, Instant};

/// Wall clocks that have never been synchronized report dates near their
/// epoch; anything before this year is treated as "not set".
const MIN_VALID_YEAR: i32 = 2016;

/// Host clock: `std::time::Instant` for monotonic time, the local timezone
/// for wall-clock time
pub struct SystemClock {
    boot: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            boot: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let millis = u64::try_from(self.boot.elapsed().as_millis()).unwrap_or(u64::MAX);
        Instant::from_millis(millis)
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn now_local(&self) -> Option<NaiveDateTime> {
        let now = Local::now().naive_local();
        if now.year() < MIN_VALID_YEAR {
            return None;
        }
        Some(now)
    }
}
