//! Legacy-test predicate.

use depwatch_core::types::MethodRef;
use depwatch_core::DepwatchConfig;

use super::resolver::GroupMetadata;

/// Decides whether a resolved method is a legacy test: by method-name prefix,
/// by a `Legacy`/`legacy` segment in its class path, or by group metadata.
#[derive(Debug, Clone)]
pub struct LegacyPolicy {
    prefixes: Vec<String>,
    group: String,
}

impl LegacyPolicy {
    pub fn new(prefixes: Vec<String>, group: impl Into<String>) -> Self {
        Self {
            prefixes,
            group: group.into(),
        }
    }

    pub fn from_config(config: &DepwatchConfig) -> Self {
        Self::new(
            config.effective_legacy_prefixes(),
            config.effective_legacy_group(),
        )
    }

    pub fn is_legacy(&self, method: &MethodRef, metadata: Option<&dyn GroupMetadata>) -> bool {
        self.has_legacy_prefix(&method.name)
            || has_legacy_segment(&method.class)
            || metadata.is_some_and(|m| {
                m.groups(&method.class, &method.name)
                    .iter()
                    .any(|g| g == &self.group)
            })
    }

    fn has_legacy_prefix(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

impl Default for LegacyPolicy {
    fn default() -> Self {
        Self::from_config(&DepwatchConfig::default())
    }
}

fn has_legacy_segment(class: &str) -> bool {
    class
        .split("::")
        .any(|segment| segment.starts_with("Legacy") || segment.starts_with("legacy"))
}
