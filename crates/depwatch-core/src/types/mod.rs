//! Record types shared by the classifier, registry, and reporters.

pub mod deprecation;
pub mod frame;
pub mod group;
pub mod notice;

pub use deprecation::Deprecation;
pub use frame::{Frame, MethodRef};
pub use group::{Group, GroupCounts};
pub use notice::{Notice, NoticeKind};
