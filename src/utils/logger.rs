use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// Log file locations, filled in by [`init`].
#[derive(Clone)]
struct LogFiles {
    errors: PathBuf,
    debug: PathBuf,
}

impl LogFiles {
    fn in_dir(dir: &Path) -> Self {
        Self {
            errors: dir.join(constants::ERROR_LOG_FILE),
            debug: dir.join(constants::DEBUG_LOG_FILE),
        }
    }

    /// Every record goes to the debug log; errors are copied to the error log.
    fn write(&self, level: Level, text: &str) {
        append(&self.debug, text);
        if level == Level::Error {
            append(&self.errors, text);
        }
    }
}

lazy_static! {
    static ref FILES: Mutex<Option<LogFiles>> = Mutex::new(None);
}

// Logging must never take the stopwatch down, so write failures are dropped.
fn append(path: &Path, text: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", text);
    }
}

fn truncate_with_header(path: &Path) {
    if let Ok(mut file) = File::create(path) {
        let _ = writeln!(
            file,
            "# {} log opened {}",
            constants::APP_NAME,
            chrono::Local::now().to_rfc3339()
        );
    }
}

fn crash_report(panic_text: &str, backtrace: &Backtrace) -> String {
    format!("[PANIC] {}\n{}", panic_text, backtrace)
}

/// Start fresh log files in `dir` and install the panic hook.
///
/// Logging stays a no-op until this has run.
pub fn init(dir: &Path) {
    let _ = fs::create_dir_all(dir);

    let files = LogFiles::in_dir(dir);
    truncate_with_header(&files.errors);
    truncate_with_header(&files.debug);

    if let Ok(mut slot) = FILES.lock() {
        *slot = Some(files.clone());
    }

    panic::set_hook(Box::new(move |info| {
        files.write(
            Level::Error,
            &crash_report(&info.to_string(), &Backtrace::capture()),
        );

        // The guard's Drop also runs while unwinding; this covers aborts.
        crate::utils::terminal_control::force_restore();
        eprintln!(
            "{}: {}\n(details in {})",
            constants::APP_NAME,
            info,
            files.errors.display()
        );
    }));
}

fn record(level: Level, msg: &str) {
    let Ok(slot) = FILES.lock() else {
        return;
    };
    if let Some(files) = slot.as_ref() {
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
        files.write(level, &format!("{} {:<5} {}", stamp, level.tag(), msg));
    }
}

pub fn info(msg: &str) {
    record(Level::Info, msg);
}

pub fn error(msg: &str) {
    record(Level::Error, msg);
}

pub fn debug(msg: &str) {
    record(Level::Debug, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_levels_to_the_right_files() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path());
        info("restored 01:05.00");
        error("save failed");

        let debug_log = fs::read_to_string(dir.path().join(constants::DEBUG_LOG_FILE)).unwrap();
        let error_log = fs::read_to_string(dir.path().join(constants::ERROR_LOG_FILE)).unwrap();
        assert!(debug_log.contains("INFO  restored 01:05.00"));
        assert!(debug_log.contains("ERROR save failed"));
        assert!(error_log.contains("ERROR save failed"));
        assert!(!error_log.contains("restored"));
        let _ = panic::take_hook();
    }

    #[test]
    fn crash_report_keeps_panic_text_first() {
        let report = crash_report(
            "panicked at src/main.rs:3:5:\nboom",
            &Backtrace::disabled(),
        );
        assert!(report.starts_with("[PANIC] panicked at src/main.rs:3:5:\nboom\n"));
    }
}
