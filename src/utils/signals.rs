//! Termination signal handling.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Install a SIGINT/SIGTERM/SIGHUP handler that raises `flag`.
///
/// The handler does nothing else; the main loop polls the flag every tick and
/// runs the normal cleanup path.
pub fn install_shutdown_flag(flag: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install signal handler")?;
    Ok(())
}
