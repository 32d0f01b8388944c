use std::ops::{Add, Neg, Sub};

use crate::shared::constants::NANOS_PER_SEC;

/// Monotonic timestamp measured from a per-process origin.
///
/// Not tied to the wall clock. Fractions are kept in nanoseconds. Clock
/// readings are never negative, but a logical start shifted back by a
/// restore or a nudge may sit before the origin, so seconds are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant {
    secs: i64,
    nanos: u32,
}

impl Instant {
    #[cfg(test)]
    pub const ZERO: Instant = Instant { secs: 0, nanos: 0 };

    #[cfg(test)]
    pub fn from_nanos(total: u64) -> Self {
        Self {
            secs: (total / NANOS_PER_SEC as u64) as i64,
            nanos: (total % NANOS_PER_SEC as u64) as u32,
        }
    }

    pub fn from_std(elapsed: std::time::Duration) -> Self {
        Self {
            secs: elapsed.as_secs() as i64,
            nanos: elapsed.subsec_nanos(),
        }
    }

    /// Shift by a signed duration, carrying the fraction into whole seconds.
    pub fn offset(self, by: Duration) -> Self {
        let mut secs = self.secs.saturating_add(by.secs);
        let mut nanos = self.nanos + by.nanos;
        if nanos >= NANOS_PER_SEC {
            nanos -= NANOS_PER_SEC;
            secs = secs.saturating_add(1);
        }
        Self { secs, nanos }
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        Duration::new(
            self.secs - rhs.secs,
            self.nanos as i64 - rhs.nanos as i64,
        )
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        self.offset(rhs)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        self.offset(-rhs)
    }
}

/// Signed elapsed time.
///
/// Normalized so that `nanos` lies in `[0, 1s)` and the sign lives in `secs`:
/// minus half a second is `{ secs: -1, nanos: 500_000_000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    secs: i64,
    nanos: u32,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };

    /// Build from a raw seconds/nanoseconds pair, borrowing or carrying
    /// whole seconds until the fraction is in range.
    pub fn new(secs: i64, nanos: i64) -> Self {
        let per_sec = NANOS_PER_SEC as i64;
        let secs = secs + nanos.div_euclid(per_sec);
        let nanos = nanos.rem_euclid(per_sec) as u32;
        Self { secs, nanos }
    }

    pub fn from_secs(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self::new(millis.div_euclid(1000), millis.rem_euclid(1000) * 1_000_000)
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    pub fn is_negative(&self) -> bool {
        self.secs < 0
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration::new(self.secs + rhs.secs, self.nanos as i64 + rhs.nanos as i64)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration::new(self.secs - rhs.secs, self.nanos as i64 - rhs.nanos as i64)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::new(-self.secs, -(self.nanos as i64))
    }
}
