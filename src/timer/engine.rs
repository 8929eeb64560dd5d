// timer/engine.rs - Countdown State Machine
//
// Idle -> Running -> {Paused <-> Running} -> Expired, and Running/Paused -> Idle
// through stop(). The engine only counts; scheduling the 1 Hz tick is the job
// of TickClock, which follows `is_ticking()`.
//
// `restart` resumes a paused countdown while `set_remaining` leaves it paused.
// The two rules differ on purpose and must not be merged.

use std::collections::VecDeque;

use log::{debug, info};

use crate::constants::timer::SECONDS_PER_MINUTE;
use crate::error::{FocusError, Result};

use super::format;

/// Current state of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Expired,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Expired => "expired",
        }
    }
}

/// Notification pushed for every state change, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started { remaining_seconds: u64 },
    Ticked { remaining_seconds: u64 },
    Paused { remaining_seconds: u64 },
    Resumed { remaining_seconds: u64 },
    Restarted { remaining_seconds: u64 },
    RemainingSet { remaining_seconds: u64 },
    Expired,
    Stopped,
}

/// Seconds for a minute count, negative input clamped to zero
fn minutes_to_seconds(minutes: i64) -> u64 {
    (minutes.max(0) as u64).saturating_mul(SECONDS_PER_MINUTE)
}

/// The countdown state machine
#[derive(Debug, Default)]
pub struct TimerEngine {
    remaining_seconds: u64,
    phase: Phase,
    ticking: bool,
    events: VecDeque<TimerEvent>,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Whether the tick source should currently be firing
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Text for the overlay: the countdown, or the expiry sentinel
    pub fn display_text(&self) -> String {
        format::display_text(self.phase, self.remaining_seconds)
    }

    /// Start counting down from `minutes`.
    ///
    /// Rejects non-positive durations. Returns `Ok(false)` when the engine is
    /// not idle, leaving the running countdown untouched.
    pub fn start(&mut self, minutes: i64) -> Result<bool> {
        if minutes <= 0 {
            return Err(FocusError::invalid_input(format!(
                "duration must be a positive number of minutes, got {}",
                minutes
            )));
        }
        if self.phase != Phase::Idle {
            debug!("Start ignored while {}", self.phase.as_str());
            return Ok(false);
        }

        self.remaining_seconds = minutes_to_seconds(minutes);
        self.phase = Phase::Running;
        self.ticking = true;
        info!("Countdown started: {} minutes", minutes);
        self.events.push_back(TimerEvent::Started {
            remaining_seconds: self.remaining_seconds,
        });
        Ok(true)
    }

    /// One second elapsed
    pub fn tick(&mut self) {
        if self.phase != Phase::Running || !self.ticking {
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.events.push_back(TimerEvent::Ticked {
            remaining_seconds: self.remaining_seconds,
        });

        if self.remaining_seconds == 0 {
            self.ticking = false;
            self.phase = Phase::Expired;
            info!("Countdown expired");
            self.events.push_back(TimerEvent::Expired);
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.ticking = false;
        self.phase = Phase::Paused;
        info!("Countdown paused at {}s", self.remaining_seconds);
        self.events.push_back(TimerEvent::Paused {
            remaining_seconds: self.remaining_seconds,
        });
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused || self.remaining_seconds == 0 {
            return false;
        }
        self.phase = Phase::Running;
        self.ticking = true;
        info!("Countdown resumed at {}s", self.remaining_seconds);
        self.events.push_back(TimerEvent::Resumed {
            remaining_seconds: self.remaining_seconds,
        });
        true
    }

    /// Reset the remaining time. A paused countdown resumes as well.
    pub fn restart(&mut self, minutes: i64) -> bool {
        match self.phase {
            Phase::Running | Phase::Paused => {}
            Phase::Idle | Phase::Expired => return false,
        }

        self.remaining_seconds = minutes_to_seconds(minutes);
        self.phase = Phase::Running;
        self.ticking = true;
        info!("Countdown restarted at {}s", self.remaining_seconds);
        self.events.push_back(TimerEvent::Restarted {
            remaining_seconds: self.remaining_seconds,
        });
        true
    }

    /// Overwrite the remaining time.
    ///
    /// Stopped ticking (after expiry) resumes unless the countdown is
    /// paused; a paused countdown keeps waiting for `resume`.
    pub fn set_remaining(&mut self, minutes: i64) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }

        self.remaining_seconds = minutes_to_seconds(minutes);
        if !self.ticking && self.phase != Phase::Paused {
            self.ticking = true;
            self.phase = Phase::Running;
        }
        debug!(
            "Remaining set to {}s ({})",
            self.remaining_seconds,
            self.phase.as_str()
        );
        self.events.push_back(TimerEvent::RemainingSet {
            remaining_seconds: self.remaining_seconds,
        });
        true
    }

    pub fn stop(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.phase = Phase::Idle;
        self.ticking = false;
        info!("Countdown stopped");
        self.events.push_back(TimerEvent::Stopped);
    }

    /// Take all notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        self.events.drain(..).collect()
    }
}
