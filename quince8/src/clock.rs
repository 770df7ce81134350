//! Wall-clock gating of the CPU and the timers.
//!
//! Each gate is polled with the current time and opens at most once per poll.
//! Gates step their reference point by a whole interval, so the long-run rate
//! matches the frequency no matter how often they're polled.

use core::time::Duration;

/// Frequency of instruction cycles
pub const CPU_FREQUENCY: u64 = 500;
/// Frequency of delay and sound timers decrements
pub const TIMER_FREQUENCY: u64 = 60;

/// Number of intervals a gate may lag behind before it drops the backlog
const MAX_BACKLOG: u32 = 4;

/// Rate gate opening once per `interval`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    last: Duration,
    interval: Duration,
}

impl Clock {
    pub fn new(frequency: u64, now: Duration) -> Self {
        Self {
            last: now,
            interval: Duration::from_nanos(1_000_000_000u64 / frequency),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restart counting from `now`
    pub fn arm(&mut self, now: Duration) {
        self.last = now;
    }

    /// Check whether an interval has elapsed since the last tick, and if so, tick
    pub fn poll(&mut self, now: Duration) -> bool {
        let elapsed = match now.checked_sub(self.last) {
            Some(elapsed) => elapsed,
            None => return false,
        };
        if elapsed < self.interval {
            return false;
        }
        if elapsed >= self.interval * MAX_BACKLOG {
            self.last = now;
        } else {
            self.last += self.interval;
        }
        true
    }
}

/// Pair of independent gates driving `Quince8::step`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clocks {
    pub cpu: Clock,
    pub timers: Clock,
}

impl Clocks {
    pub fn new(now: Duration) -> Self {
        Self {
            cpu: Clock::new(CPU_FREQUENCY, now),
            timers: Clock::new(TIMER_FREQUENCY, now),
        }
    }

    pub fn arm(&mut self, now: Duration) {
        self.cpu.arm(now);
        self.timers.arm(now);
    }
}
