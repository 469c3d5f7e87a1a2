//! Error types for depwatch.

pub mod depwatch_error;
pub mod error_code;

pub use depwatch_error::{DepwatchError, DepwatchResult};
pub use error_code::DepwatchErrorCode;
