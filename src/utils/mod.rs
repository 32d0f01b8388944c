pub mod file_utils;
pub mod logger;
pub mod signals;
pub mod terminal_control;
