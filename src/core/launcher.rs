use anyhow::Result;
use std::io::{self, BufWriter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::core::{SaveFile, Stopwatch, StopwatchConfig};
use crate::renderer::Display;
use crate::sync::{Clock, MonotonicClock};
use crate::ui::input::{Dispatcher, TerminalInput};
use crate::ui::session::Session;
use crate::utils::logger;
use crate::utils::signals;
use crate::utils::terminal_control::TerminalGuard;

pub fn run(config: StopwatchConfig) -> Result<()> {
    logger::info(&format!("launch config: {:?}", config));

    let save_file = resolve_save_file(&config)?;
    let stopwatch = prepare_stopwatch(MonotonicClock::new(), &config, save_file.as_ref());

    let shutdown = Arc::new(AtomicBool::new(false));
    signals::install_shutdown_flag(shutdown.clone())?;

    let mut guard = TerminalGuard::acquire()?;
    let display = Display::new(BufWriter::new(io::stdout()));

    let mut session = Session::new(
        stopwatch,
        Dispatcher::new(&config),
        TerminalInput,
        display,
        save_file,
        config.save,
        shutdown,
    );
    session.run(|| guard.restore())?;

    logger::info(&format!(
        "finished at {}",
        crate::core::codec::encode(session.stopwatch().elapsed())
    ));
    Ok(())
}

/// The save file location, if one is known.
///
/// A missing home directory only matters when the run asked to save or restore.
fn resolve_save_file(config: &StopwatchConfig) -> Result<Option<SaveFile>> {
    let path = match &config.save_file {
        Some(path) => Ok(path.clone()),
        None => SaveFile::default_path(),
    };
    match path {
        Ok(path) => Ok(Some(SaveFile::new(path))),
        Err(e) if config.uses_save_file() => Err(e),
        Err(e) => {
            logger::error(&format!("save file unavailable: {:#}", e));
            Ok(None)
        }
    }
}

/// Build the stopwatch and apply any restored offset before the first tick.
fn prepare_stopwatch<C: Clock>(
    clock: C,
    config: &StopwatchConfig,
    save_file: Option<&SaveFile>,
) -> Stopwatch<C> {
    let mut stopwatch = Stopwatch::new(clock, config.start_paused);
    if config.restore {
        if let Some(file) = save_file {
            stopwatch.restore_offset(file.load_or_zero());
        }
    }
    stopwatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::encode;
    use crate::sync::clock::ManualClock;
    use crate::sync::Duration;
    use tempfile::tempdir;

    #[test]
    fn restore_without_save_file_starts_at_zero() {
        let dir = tempdir().unwrap();
        let config = StopwatchConfig {
            restore: true,
            start_paused: true,
            ..Default::default()
        };
        let file = SaveFile::new(dir.path().join("saved_time"));
        let watch = prepare_stopwatch(ManualClock::new(), &config, Some(&file));
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn restore_applies_saved_offset() {
        let dir = tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("saved_time"));
        file.store(Duration::from_millis(3_723_400)).unwrap();

        let config = StopwatchConfig {
            restore: true,
            start_paused: true,
            ..Default::default()
        };
        let watch = prepare_stopwatch(ManualClock::new(), &config, Some(&file));
        assert_eq!(encode(watch.elapsed()), "1:02:03.40");
    }

    #[test]
    fn saved_time_ignored_unless_restoring() {
        let dir = tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("saved_time"));
        file.store(Duration::from_secs(30)).unwrap();

        let config = StopwatchConfig {
            start_paused: true,
            ..Default::default()
        };
        let watch = prepare_stopwatch(ManualClock::new(), &config, Some(&file));
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn explicit_save_path_wins() {
        let config = StopwatchConfig {
            save_file: Some("/tmp/elsewhere/saved".into()),
            ..Default::default()
        };
        let file = resolve_save_file(&config).unwrap().unwrap();
        assert_eq!(file.path(), std::path::Path::new("/tmp/elsewhere/saved"));
    }

    #[test]
    fn restore_at_clock_origin_applies_saved_offset() {
        let dir = tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("saved_time"));
        file.store(Duration::from_millis(3_723_400)).unwrap();

        let config = StopwatchConfig {
            restore: true,
            ..Default::default()
        };
        let clock = ManualClock::new();
        let watch = prepare_stopwatch(clock.clone(), &config, Some(&file));
        assert_eq!(encode(watch.elapsed()), "1:02:03.40");

        clock.advance_millis(1_600);
        assert_eq!(encode(watch.elapsed()), "1:02:05.00");
    }
}
