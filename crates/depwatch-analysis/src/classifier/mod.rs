//! Classifier — turns a raw deprecation notice into a `Deprecation` record.
//!
//! - `resolver.rs` — `CallSiteResolver` capability, `FrameResolver`, `TestCatalog`
//! - `legacy.rs` — legacy-test predicate

pub mod legacy;
pub mod resolver;

use std::sync::Arc;

use depwatch_core::types::{Deprecation, Frame, Group, MethodRef, Notice};
use depwatch_core::DepwatchConfig;

pub use legacy::LegacyPolicy;
pub use resolver::{CallSiteResolver, FrameResolver, GroupMetadata, TestCatalog, TestMethod};

/// Resolves the originating test method of a notice and assigns its group.
///
/// Group policy, first match wins: unsilenced, legacy, remaining, other.
pub struct Classifier {
    resolver: Box<dyn CallSiteResolver>,
    metadata: Option<Arc<dyn GroupMetadata>>,
    skip_prefixes: Vec<String>,
    legacy: LegacyPolicy,
}

impl Classifier {
    /// Classifier with default skip prefixes and legacy policy.
    pub fn new(resolver: impl CallSiteResolver + 'static) -> Self {
        let config = DepwatchConfig::default();
        Self {
            resolver: Box::new(resolver),
            metadata: None,
            skip_prefixes: config.effective_skip_prefixes(),
            legacy: LegacyPolicy::from_config(&config),
        }
    }

    /// Frame-trusting classifier configured from `config`.
    pub fn from_config(config: &DepwatchConfig) -> Self {
        Self::new(FrameResolver)
            .with_skip_prefixes(config.effective_skip_prefixes())
            .with_legacy_policy(LegacyPolicy::from_config(config))
    }

    pub fn with_metadata(mut self, metadata: Arc<dyn GroupMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_skip_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.skip_prefixes = prefixes;
        self
    }

    pub fn with_legacy_policy(mut self, legacy: LegacyPolicy) -> Self {
        self.legacy = legacy;
        self
    }

    /// Build the record for a deprecation notice and its captured stack
    /// (most-recent-first).
    pub fn classify(&self, notice: &Notice, trace: Vec<Frame>) -> Deprecation {
        let method = self.find_call_site(&trace);
        let group = self.group_for(notice, method.as_ref());
        Deprecation::new(group, notice.message.clone(), trace, method)
    }

    /// Locate the originating method.
    ///
    /// Walks from the outermost frame toward the most recent one, skipping
    /// harness frames. The first frame that is not skipped is the call site;
    /// it resolves only if it carries both a class and a function.
    pub fn find_call_site(&self, trace: &[Frame]) -> Option<MethodRef> {
        let frame = trace.iter().rev().find(|frame| !self.is_skipped(frame))?;
        if frame.class.is_none() || frame.function.is_none() {
            return None;
        }
        self.resolver.resolve(frame)
    }

    pub fn group_for(&self, notice: &Notice, method: Option<&MethodRef>) -> Group {
        if !notice.is_silenced() {
            return Group::Unsilenced;
        }
        match method {
            Some(m) if self.legacy.is_legacy(m, self.metadata.as_deref()) => Group::Legacy,
            Some(_) => Group::Remaining,
            None => Group::Other,
        }
    }

    /// Harness frame: owned by a path under one of the skip prefixes.
    /// Frames without a class are matched on their function path.
    fn is_skipped(&self, frame: &Frame) -> bool {
        let owner = match (frame.class.as_deref(), frame.function.as_deref()) {
            (Some(class), _) => class,
            (None, Some(function)) => function,
            (None, None) => return false,
        };
        self.skip_prefixes
            .iter()
            .any(|prefix| owner.starts_with(prefix.as_str()))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(FrameResolver)
    }
}
