use std::path::PathBuf;

/// Behaviour switches for one stopwatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwatchConfig {
    /// Write the elapsed time to the save file on exit.
    pub save: bool,
    /// Start from the time stored in the save file.
    pub restore: bool,
    /// Pausing ends the run instead of waiting.
    pub exit_on_pause: bool,
    pub start_paused: bool,
    /// Any key ends the run, once the timer is running.
    pub exit_on_any_key: bool,
    /// Overrides `~/.sw/saved_time`.
    pub save_file: Option<PathBuf>,
}

impl StopwatchConfig {
    /// Whether the run touches the save file at all.
    pub fn uses_save_file(&self) -> bool {
        self.save || self.restore
    }
}
