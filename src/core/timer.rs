use crate::core::elapsed;
use crate::shared::constants::NUDGE_STEP_SECS;
use crate::sync::{Clock, Duration, Instant};

/// Raw timer fields.
///
/// `paused_at` only carries meaning while `running` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub start: Instant,
    pub paused_at: Instant,
    pub running: bool,
}

/// Pausable stopwatch driven by a [`Clock`].
///
/// Every mutation goes through the methods below; each returns `true` when the
/// state actually changed.
pub struct Stopwatch<C: Clock> {
    clock: C,
    state: TimerState,
}

impl<C: Clock> Stopwatch<C> {
    /// Start timing now, optionally frozen at zero.
    pub fn new(clock: C, start_paused: bool) -> Self {
        let now = clock.now();
        Self {
            clock,
            state: TimerState {
                start: now,
                paused_at: now,
                running: !start_paused,
            },
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn elapsed(&self) -> Duration {
        elapsed::elapsed(&self.state, self.clock.now())
    }

    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.paused_at = self.clock.now();
        self.state.running = false;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        let now = self.clock.now();
        let delta = now - self.state.paused_at;
        self.state.start = self.state.start + delta;
        self.state.paused_at = now;
        self.state.running = true;
        true
    }

    /// Pause if running, resume if paused. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.state.running {
            self.pause();
        } else {
            self.resume();
        }
        self.state.running
    }

    pub fn reset(&mut self) -> bool {
        let now = self.clock.now();
        self.state.start = now;
        if !self.state.running {
            self.state.paused_at = now;
        }
        true
    }

    pub fn nudge_forward(&mut self) -> bool {
        self.state.start = self.state.start - Duration::from_secs(NUDGE_STEP_SECS);
        true
    }

    /// Take a second off the reading, stopping at zero.
    pub fn nudge_back(&mut self) -> bool {
        // Paused readings are measured against paused_at, not now.
        let limit = if self.state.running {
            self.clock.now()
        } else {
            self.state.paused_at
        };
        let moved = self.state.start + Duration::from_secs(NUDGE_STEP_SECS);
        let start = moved.min(limit);
        let changed = start != self.state.start;
        self.state.start = start;
        changed
    }

    /// Pretend the timer was started `offset` earlier. Negative offsets count as zero.
    pub fn restore_offset(&mut self, offset: Duration) {
        if offset.is_negative() {
            return;
        }
        self.state.start = self.state.start - offset;
    }
}
