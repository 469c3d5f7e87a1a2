//! Reporters — render a `DeprecationSnapshot` for people or tools.
//!
//! - `output.rs` — numbered per-message summary (`TextReporter`)
//! - `checkstyle.rs` — checkstyle XML (`CheckstyleReporter`)
//! - `groups.rs` — per-group breakdown with call-site counts (`GroupSummaryReporter`)
//! - `buckets.rs` — message/call-site aggregation shared by the text reporters

pub mod buckets;
pub mod checkstyle;
pub mod groups;
pub mod output;

use depwatch_core::DepwatchResult;

use crate::registry::DeprecationSnapshot;

pub use buckets::{bucket_by_message, CallSite, MessageBucket};
pub use checkstyle::CheckstyleReporter;
pub use groups::GroupSummaryReporter;
pub use output::TextReporter;

/// A report format. Reporters only read the snapshot they are given.
pub trait Reporter {
    /// Short format name, e.g. "text".
    fn name(&self) -> &'static str;

    fn generate(&self, snapshot: &DeprecationSnapshot) -> DepwatchResult<String>;
}
