use crate::core::timer::TimerState;
use crate::sync::{Duration, Instant};

/// Elapsed time for `state` as of `now`.
///
/// While paused the reading is frozen at `paused_at`, no matter how far `now`
/// has moved on.
pub fn elapsed(state: &TimerState, now: Instant) -> Duration {
    let end = if state.running { now } else { state.paused_at };
    end - state.start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: u64) -> Instant {
        Instant::from_nanos(millis * 1_000_000)
    }

    #[test]
    fn running_measures_up_to_now() {
        let state = TimerState {
            start: at(1_800),
            paused_at: at(1_800),
            running: true,
        };
        assert_eq!(elapsed(&state, at(4_300)), Duration::from_millis(2_500));
    }

    #[test]
    fn paused_ignores_now() {
        let state = TimerState {
            start: at(1_000),
            paused_at: at(3_000),
            running: false,
        };
        assert_eq!(elapsed(&state, at(9_000)), Duration::from_secs(2));
        assert_eq!(elapsed(&state, at(90_000)), Duration::from_secs(2));
    }
}
