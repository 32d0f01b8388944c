use std::time::Duration;

pub const APP_NAME: &str = "sw";

pub const SAVE_DIR_NAME: &str = ".sw";
pub const SAVE_FILE_NAME: &str = "saved_time";
pub const ERROR_LOG_FILE: &str = "sw-error.log";
pub const DEBUG_LOG_FILE: &str = "sw-debug.log";

/// Main loop cadence. The input poll waits at most this long, so it also acts as the tick sleep.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);

pub const NUDGE_STEP_SECS: i64 = 1;

pub const NANOS_PER_SEC: u32 = 1_000_000_000;
pub const NANOS_PER_CENTI: u32 = 10_000_000;

pub const SECS_PER_HOUR: i64 = 3600;
pub const SECS_PER_MINUTE: i64 = 60;
