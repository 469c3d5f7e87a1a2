//! Configuration: TOML file values overlaid with environment variables.

pub mod depwatch_config;
pub mod report_mode;

pub use depwatch_config::DepwatchConfig;
pub use report_mode::ReportMode;
