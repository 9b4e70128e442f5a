//! Cooperative software timers.
//!
//! A [`Timer`] never fires on its own: the owner calls [`Timer::update`] from the
//! polling loop and runs the associated work when it returns `true`. All
//! methods take the current [`Instant`] so tests can drive time explicitly.

use std::time::{Duration, Instant};

/// Whether a timer re-arms after firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Once,
}

#[derive(Clone, Debug)]
pub struct Timer {
    interval: Duration,
    repeat: Repeat,
    running: bool,
    last: Option<Instant>,
}

impl Timer {
    pub fn new(interval: Duration, repeat: Repeat) -> Self {
        Self {
            interval,
            repeat,
            running: false,
            last: None,
        }
    }

    pub fn recurring(interval: Duration) -> Self {
        Self::new(interval, Repeat::Forever)
    }

    /// Arm the timer; the first fire is one interval after `now`.
    /// Starting a running timer restarts its interval.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.last = Some(now);
    }

    /// Disarm the timer. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` when the timer is due. The next interval is measured
    /// from `now`, so a late poll never produces a burst of catch-up fires.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let Some(last) = self.last else {
            return false;
        };
        if now.saturating_duration_since(last) < self.interval {
            return false;
        }
        self.last = Some(now);
        if self.repeat == Repeat::Once {
            self.running = false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = Timer::recurring(Duration::from_secs(1));
        assert!(!timer.update(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn recurring_timer_fires_each_interval() {
        let t0 = Instant::now();
        let mut timer = Timer::recurring(Duration::from_secs(5));
        timer.start(t0);
        assert!(!timer.update(t0 + Duration::from_secs(4)));
        assert!(timer.update(t0 + Duration::from_secs(5)));
        assert!(!timer.update(t0 + Duration::from_secs(6)));
        assert!(timer.update(t0 + Duration::from_secs(10)));
        assert!(timer.is_running());
    }

    #[test]
    fn late_poll_fires_once() {
        let t0 = Instant::now();
        let mut timer = Timer::recurring(Duration::from_secs(1));
        timer.start(t0);
        assert!(timer.update(t0 + Duration::from_secs(30)));
        assert!(!timer.update(t0 + Duration::from_millis(30_500)));
    }

    #[test]
    fn one_shot_stops_after_firing() {
        let t0 = Instant::now();
        let mut timer = Timer::new(Duration::from_millis(100), Repeat::Once);
        timer.start(t0);
        assert!(timer.update(t0 + Duration::from_millis(100)));
        assert!(!timer.is_running());
        assert!(!timer.update(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn stop_is_idempotent_and_restart_rebases() {
        let t0 = Instant::now();
        let mut timer = Timer::recurring(Duration::from_secs(1));
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        timer.start(t0);
        timer.start(t0 + Duration::from_millis(900));
        assert!(!timer.update(t0 + Duration::from_secs(1)));
        assert!(timer.update(t0 + Duration::from_millis(1900)));
    }
}
