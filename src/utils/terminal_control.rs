use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, IsTerminal};

/// Raw mode plus hidden cursor for as long as the guard lives.
///
/// `restore` may be called any number of times; only the first one touches
/// the terminal. Dropping the guard restores as well, which covers error
/// returns and unwinding.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        if !io::stdin().is_terminal() {
            anyhow::bail!("stdin is not a terminal");
        }

        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self { active: true };
        execute!(io::stdout(), Hide).context("failed to hide cursor")?;

        crate::utils::logger::debug("terminal switched to raw mode");
        Ok(guard)
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(e) = disable_raw_mode() {
            crate::utils::logger::error(&format!("Failed to disable raw mode: {}", e));
        }
        if let Err(e) = execute!(io::stdout(), Show) {
            crate::utils::logger::error(&format!("Failed to show cursor: {}", e));
        }
        crate::utils::logger::debug("terminal restored");
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Unconditional restore for paths that cannot reach the guard (panic hook, startup).
pub fn force_restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show);
}
