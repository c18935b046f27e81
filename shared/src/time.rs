use std::time::Duration;

use chrono::NaiveDateTime;

use crate::constants::UNKNOWN_TIMESTAMP;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point on the device's monotonic clock, in milliseconds since boot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    millis: u64,
}

impl Instant {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    /// Time elapsed since `earlier`, saturating at zero
    pub fn duration_since(&self, earlier: &Instant) -> Duration {
        Duration::from_millis(self.millis.saturating_sub(earlier.millis))
    }

    pub fn add(&self, duration: Duration) -> Instant {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Instant::from_millis(self.millis.saturating_add(millis))
    }
}

/// Monotonic time, blocking delay, and (possibly unavailable) wall-clock time
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&mut self, duration: Duration);

    /// Local wall-clock time, or `None` if the clock has not been set yet
    fn now_local(&self) -> Option<NaiveDateTime>;
}

/// Formats a wall-clock reading the way it is stored in attendance events
pub fn format_timestamp(time: Option<NaiveDateTime>) -> String {
    match time {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => UNKNOWN_TIMESTAMP.to_string(),
    }
}

/// Rate limiter for a periodic activity. A fresh timer rings immediately so
/// the activity runs on the first tick after boot.
#[derive(Clone, Debug)]
pub struct Timer {
    duration: Duration,
    last: Option<Instant>,
}

impl Timer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            last: None,
        }
    }

    pub fn reset(&mut self, now: &Instant) {
        self.last = Some(*now);
    }

    pub fn ringing(&self, now: &Instant) -> bool {
        match &self.last {
            None => true,
            Some(last) => now.duration_since(last) >= self.duration,
        }
    }

    /// Returns whether the timer was ringing, resetting it if so
    pub fn try_ring(&mut self, now: &Instant) -> bool {
        if self.ringing(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }
}

/// A point in time after which the current operation is abandoned
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(now: &Instant, timeout: Duration) -> Self {
        Self { at: now.add(timeout) }
    }

    pub fn expired(&self, now: &Instant) -> bool {
        *now >= self.at
    }
}
