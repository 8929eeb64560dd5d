// timer/clock.rs - 1 Hz Tick Source
//
// The event loop never sleeps in a background thread. Instead it asks this
// clock for the next deadline, waits until then, and feeds the number of
// elapsed intervals back into the engine.

use std::time::{Duration, Instant};

use crate::constants::timer::TICK_INTERVAL;

/// Deadline bookkeeping for the countdown tick
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    next_at: Option<Instant>,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_at: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_at.is_some()
    }

    /// Align the clock with whether the engine wants ticks.
    ///
    /// An already armed clock keeps its cadence. A freshly armed one waits a
    /// full interval, so a resumed countdown never loses a partial second.
    pub fn sync(&mut self, ticking: bool, now: Instant) {
        match (ticking, self.next_at) {
            (true, None) => self.next_at = Some(now + self.interval),
            (false, Some(_)) => self.next_at = None,
            _ => {}
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_at
    }

    /// Number of whole intervals that elapsed up to `now`
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_at else {
            return 0;
        };

        let mut due = 0;
        while next <= now {
            due += 1;
            next += self.interval;
        }
        self.next_at = Some(next);
        due
    }

    pub fn disarm(&mut self) {
        self.next_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_clock_has_no_deadline() {
        let mut clock = TickClock::default();
        assert!(clock.next_deadline().is_none());
        assert_eq!(clock.take_due(Instant::now()), 0);
    }

    #[test]
    fn arming_waits_a_full_interval() {
        let now = Instant::now();
        let mut clock = TickClock::default();
        clock.sync(true, now);
        assert_eq!(clock.next_deadline(), Some(now + TICK_INTERVAL));
        assert_eq!(clock.take_due(now + Duration::from_millis(999)), 0);
        assert_eq!(clock.take_due(now + Duration::from_secs(1)), 1);
        assert_eq!(clock.next_deadline(), Some(now + Duration::from_secs(2)));
    }

    #[test]
    fn catches_up_after_a_long_stall() {
        let now = Instant::now();
        let mut clock = TickClock::default();
        clock.sync(true, now);
        assert_eq!(clock.take_due(now + Duration::from_millis(3500)), 3);
        assert_eq!(clock.next_deadline(), Some(now + Duration::from_secs(4)));
    }

    #[test]
    fn sync_keeps_cadence_while_armed() {
        let now = Instant::now();
        let mut clock = TickClock::default();
        clock.sync(true, now);
        clock.sync(true, now + Duration::from_millis(400));
        assert_eq!(clock.next_deadline(), Some(now + TICK_INTERVAL));
    }

    #[test]
    fn sync_disarms_when_ticking_stops() {
        let now = Instant::now();
        let mut clock = TickClock::default();
        clock.sync(true, now);
        clock.sync(false, now);
        assert!(!clock.is_armed());
    }
}
