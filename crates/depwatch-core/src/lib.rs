//! # depwatch-core
//!
//! Foundation crate for the depwatch deprecation collector.
//! Defines the record types, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{DepwatchConfig, ReportMode};
pub use errors::{DepwatchError, DepwatchErrorCode, DepwatchResult};
pub use types::{Deprecation, Frame, Group, GroupCounts, MethodRef, Notice, NoticeKind};
