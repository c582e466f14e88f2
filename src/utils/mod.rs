//! Configuration, colors and time formatting

pub mod color;
pub mod config;
pub mod time_format;

pub use color::ColorRegistry;
pub use config::{validate_options, ConfigError, OptionsManager, PanelOptions};
pub use time_format::{format_time_label, slider_ticks};
