pub mod display;

pub use display::Display;
