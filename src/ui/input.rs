use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::core::StopwatchConfig;

/// Something the session should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Toggle,
    /// Pause, then end the run (exit-on-pause).
    PauseAndQuit,
    Save,
    Reset,
    NudgeForward,
    NudgeBack,
    Quit,
}

/// Key produced for Ctrl+C, which raw mode delivers as a key press instead of SIGINT.
pub const INTERRUPT_KEY: KeyCode = KeyCode::Null;

/// Non-blocking key reader.
pub trait InputSource {
    /// Wait up to `timeout` for one key. `Ok(None)` means nothing arrived.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>>;
}

/// Keyboard input through crossterm. Expects raw mode.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    return Ok(Some(INTERRUPT_KEY));
                }
                Ok(Some(key.code))
            }
            _ => Ok(None),
        }
    }
}

/// Turns keys into actions, applying the exit-on-pause / exit-on-any-key modes.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    exit_on_pause: bool,
    exit_on_any_key: bool,
    /// Set while a start-paused run has not been resumed yet.
    holding: bool,
}

impl Dispatcher {
    pub fn new(config: &StopwatchConfig) -> Self {
        Self {
            exit_on_pause: config.exit_on_pause,
            exit_on_any_key: config.exit_on_any_key,
            holding: config.start_paused,
        }
    }

    /// Map `key` given whether the timer is currently running.
    pub fn dispatch(&mut self, key: KeyCode, running: bool) -> Action {
        if key == INTERRUPT_KEY {
            return Action::Quit;
        }

        if self.holding {
            if running {
                self.holding = false;
            } else if self.exit_on_any_key {
                // Only space counts until the first resume.
                if key == KeyCode::Char(' ') {
                    self.holding = false;
                    return Action::Toggle;
                }
                return Action::None;
            }
        }

        if self.exit_on_any_key {
            return Action::Quit;
        }

        match key {
            KeyCode::Char(' ') => {
                if running && self.exit_on_pause {
                    Action::PauseAndQuit
                } else {
                    Action::Toggle
                }
            }
            KeyCode::Char('s') => Action::Save,
            KeyCode::Char('r') => Action::Reset,
            KeyCode::Char('+') => Action::NudgeForward,
            KeyCode::Char('-') => Action::NudgeBack,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}
