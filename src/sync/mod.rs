pub mod clock;
pub mod time;

pub use clock::{Clock, MonotonicClock};
pub use time::{Duration, Instant};
