pub mod codec;
pub mod config;
pub mod elapsed;
pub mod launcher;
pub mod save_file;
pub mod timer;

pub use config::StopwatchConfig;
pub use save_file::SaveFile;
pub use timer::Stopwatch;
