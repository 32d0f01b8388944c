mod core;
mod renderer;
mod shared;
mod sync;
mod ui;
mod utils;

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::{SaveFile, StopwatchConfig};

/// Terminal stopwatch.
///
/// Keys: space pause/resume, s save, r reset, + / - nudge one second, q quit.
#[derive(Parser, Debug)]
#[command(name = "sw", author, version, about, long_about = None)]
struct Cli {
    /// Save the elapsed time on exit
    #[arg(short, long)]
    save: bool,
    /// Start from the previously saved time
    #[arg(short, long)]
    restore: bool,
    /// Exit instead of pausing
    #[arg(short = 'p', long)]
    exit_on_pause: bool,
    /// Start with the timer paused
    #[arg(short = 'P', long)]
    start_paused: bool,
    /// Exit on any key once the timer is running
    #[arg(short = 'a', long)]
    exit_on_any_key: bool,
    /// Save file location (default: ~/.sw/saved_time)
    #[arg(long, value_name = "PATH")]
    save_file: Option<PathBuf>,
}

impl From<&Cli> for StopwatchConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            save: cli.save,
            restore: cli.restore,
            exit_on_pause: cli.exit_on_pause,
            start_paused: cli.start_paused,
            exit_on_any_key: cli.exit_on_any_key,
            save_file: cli.save_file.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Ok(dir) = SaveFile::default_dir() {
        crate::utils::logger::init(&dir);
    }

    // Recover from a previous crash that left the terminal raw.
    crate::utils::terminal_control::force_restore();

    match crate::core::launcher::run(StopwatchConfig::from(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            crate::utils::logger::error(&format!("{:#}", e));
            eprintln!("{}: {:#}", crate::shared::constants::APP_NAME, e);
            ExitCode::FAILURE
        }
    }
}
