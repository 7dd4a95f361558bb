use std::time::{Duration, Instant};

/// Fixed-cadence tick scheduler.
///
/// Reifies the "reschedule after every tick" loop into a value the game
/// loop polls with explicit instants, so pause, resume, and shutdown are
/// deterministic and testable without wall-clock waits. Stopping is
/// simply ceasing to reschedule: a ticker with no deadline never fires.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Arms the ticker: the first fire is one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Suspends firing until [`Ticker::resume`].
    pub fn pause(&mut self) {
        self.deadline = None;
    }

    /// Re-arms after a pause, one full interval from `now`.
    pub fn resume(&mut self, now: Instant) {
        self.start(now);
    }

    /// Changes the interval. Takes effect from the next re-arm, so an
    /// in-flight deadline is not stretched or cut short.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns true when the ticker is armed.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires if `now` has reached the deadline, re-arming for the next
    /// interval. Returns whether a tick is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn does_not_fire_before_the_deadline() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(199)));
    }

    #[test]
    fn fires_at_the_deadline_and_rearms() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(start);

        assert!(ticker.poll(start + INTERVAL));
        // Re-armed relative to the fire instant.
        assert!(!ticker.poll(start + INTERVAL));
        assert!(ticker.poll(start + INTERVAL + INTERVAL));
    }

    #[test]
    fn never_fires_unarmed_or_paused() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);

        assert!(!ticker.poll(start + Duration::from_secs(60)));

        ticker.start(start);
        ticker.pause();
        assert!(!ticker.is_scheduled());
        assert!(!ticker.poll(start + Duration::from_secs(60)));
    }

    #[test]
    fn resume_restarts_from_a_full_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(start);
        ticker.pause();

        let resumed_at = start + Duration::from_secs(5);
        ticker.resume(resumed_at);

        assert!(!ticker.poll(resumed_at + Duration::from_millis(100)));
        assert!(ticker.poll(resumed_at + INTERVAL));
    }

    #[test]
    fn interval_changes_apply_from_the_next_rearm() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL);
        ticker.start(start);

        ticker.set_interval(Duration::from_millis(100));
        // Existing deadline still honors the old interval.
        assert!(!ticker.poll(start + Duration::from_millis(100)));
        assert!(ticker.poll(start + INTERVAL));
        // The re-armed deadline uses the new interval.
        assert!(ticker.poll(start + INTERVAL + Duration::from_millis(100)));
    }
}
