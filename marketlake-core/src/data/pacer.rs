//! Fixed pacing between external calls, to stay under provider rate limits.
//!
//! One `Pacer` is shared by every stage of a run, so the delay also applies
//! across stage boundaries (last stock → first index → first FRED series).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    called: AtomicBool,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            called: AtomicBool::new(false),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// No delay at all (tests, offline fixtures).
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call before every external request. The first request goes out
    /// immediately; each later one waits for the configured delay.
    pub fn before_call(&self) {
        if self.called.swap(true, Ordering::SeqCst) {
            self.pause();
        }
    }

    /// Block the current thread for the configured delay.
    pub fn pause(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn none_does_not_block() {
        let start = Instant::now();
        Pacer::none().pause();
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn pause_waits_at_least_delay() {
        let start = Instant::now();
        Pacer::from_millis(10).pause();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn first_call_is_not_delayed() {
        let pacer = Pacer::from_millis(200);
        let start = Instant::now();
        pacer.before_call();
        assert!(start.elapsed() < Duration::from_millis(150));

        let start = Instant::now();
        pacer.before_call();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
