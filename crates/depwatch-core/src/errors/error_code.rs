//! Stable error codes surfaced to host runners.

pub const REPORT_WRITE_FAILED: &str = "REPORT_WRITE_FAILED";
pub const IO_ERROR: &str = "IO_ERROR";
pub const INVALID_MODE: &str = "INVALID_MODE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait DepwatchErrorCode {
    fn error_code(&self) -> &'static str;
}
